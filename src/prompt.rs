//! Prompt builders for the chat assistant and the content-generation tools.

use crate::{knowledge::KnowledgeBase, language::tone_directive, types::Language};

/// System instructions for a chat reply in `language`.
///
/// Persona, service-area restriction, the knowledge base, tone and the
/// contact hand-off all live here so the model quotes the same prices as the
/// rule-based fallback.
pub fn chat_system_instructions(kb: &KnowledgeBase, language: Language) -> String {
    let contact = kb.contact();
    [
        format!("You are the {} event-planning assistant.", kb.business_name),
        format!("You help clients in {} only.", kb.service_area_phrase()),
        "Ask concise questions to gather event type, date, guest count, budget, and venue preferences."
            .to_string(),
        tone_directive(language).to_string(),
        "Keep responses concise and professional.".to_string(),
        "Only quote packages and prices from the catalog below; for anything else, offer a custom quote."
            .to_string(),
        format!(
            "When the user is ready, offer WhatsApp ({}) and email ({}) contact options.",
            contact.whatsapp_url, contact.email
        ),
        "If asked about areas outside these cities, politely explain the current service areas."
            .to_string(),
        format!("Catalog:\n{}", kb.prompt_text()),
    ]
    .join("\n")
}

/// Prompt for a blog draft about `subject`.
pub fn blog_prompt(business_name: &str, subject: &str) -> String {
    [
        format!("You are a senior event content writer for {business_name}."),
        "Write a blog post for our event planning company.".to_string(),
        "Use formal, professional English.".to_string(),
        "Return ONLY valid JSON with keys: title, excerpt, content, seo_title, seo_description."
            .to_string(),
        "Content should be 500-700 words, include headings and bullet points, and end with a clear call-to-action."
            .to_string(),
        format!("Topic: {subject}"),
    ]
    .join(" ")
}

/// Prompt for an SEO title/description pair.
pub fn seo_prompt(business_name: &str, title: &str, content: &str) -> String {
    [
        format!("You are an SEO specialist for {business_name}."),
        "Use formal, professional English.".to_string(),
        "Return ONLY valid JSON with keys: seo_title and seo_description.".to_string(),
        "SEO title 50-60 chars, description 140-160 chars.".to_string(),
        format!("Title: {title}"),
        format!("Content: {content}"),
    ]
    .join(" ")
}

/// Prompt for translating `text` into formal English.
pub fn translate_prompt(text: &str) -> String {
    [
        "Translate the following text into formal, professional English.".to_string(),
        "Return ONLY valid JSON with key: translation.".to_string(),
        format!("Text: {text}"),
    ]
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KNOWLEDGE_BASE;

    #[test]
    fn chat_instructions_follow_language() {
        let en = chat_system_instructions(&KNOWLEDGE_BASE, Language::English);
        let hi = chat_system_instructions(&KNOWLEDGE_BASE, Language::Hindi);
        assert!(en.contains("formal, polite English"));
        assert!(hi.contains("Hinglish"));
    }

    #[test]
    fn chat_instructions_embed_catalog_and_contact() {
        let text = chat_system_instructions(&KNOWLEDGE_BASE, Language::English);
        assert!(text.contains("Delhi, Greater Noida, and Varanasi"));
        assert!(text.contains("Royal Experience"));
        assert!(text.contains("vaidikutsav03@gmail.com"));
    }

    #[test]
    fn blog_prompt_carries_topic() {
        let p = blog_prompt("VedicUtsav", "Winter weddings in Varanasi");
        assert!(p.contains("Topic: Winter weddings in Varanasi"));
        assert!(p.contains("seo_description"));
    }
}
