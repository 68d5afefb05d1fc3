//! Tests for [`utsav_assistant::fallback`]

use utsav_assistant::fallback::build_fallback_reply;

const OUT_OF_AREA_SENTENCE: &str = "we do not serve that city";

// ── Invariants over many inputs ───────────────────────────────────────────────

fn sample_messages() -> Vec<&'static str> {
    vec![
        "",
        "   ",
        "hello",
        "I want a wedding for 200 guests in Delhi",
        "Corporate conference in Mumbai, how much?",
        "Birthday party + kitty party",
        "kitna kharcha hoga?",
        "🎉🎉🎉",
        "Do you do events in Varanasi?",
        "WEDDING and BIRTHDAY in BANGALORE",
    ]
}

/// Test 1: every reply is non-empty and carries cities and contact details.
#[test]
fn test_reply_always_has_cities_and_contact() {
    for msg in sample_messages() {
        let reply = build_fallback_reply(msg);
        assert!(!reply.is_empty());
        for city in ["Delhi", "Greater Noida", "Varanasi"] {
            assert!(reply.contains(city), "{msg:?} missing {city}");
        }
        assert!(reply.contains("+91 93691 90920"), "{msg:?} missing phone");
        assert!(reply.contains("vaidikutsav03@gmail.com"), "{msg:?} missing email");
    }
}

/// Test 2: same input, byte-identical output.
#[test]
fn test_reply_is_idempotent() {
    for msg in sample_messages() {
        assert_eq!(build_fallback_reply(msg), build_fallback_reply(msg));
    }
}

// ── Out-of-area redirect ──────────────────────────────────────────────────────

/// Test 3: known out-of-area cities trigger the redirect sentence.
#[test]
fn test_out_of_area_city_triggers_redirect() {
    for msg in [
        "Can you plan in Mumbai?",
        "wedding in PUNE next year",
        "Bengaluru office party",
        "Jaipur, Goa or Hyderabad?",
    ] {
        assert!(build_fallback_reply(msg).contains(OUT_OF_AREA_SENTENCE), "{msg:?}");
    }
}

/// Test 4: served cities and unrelated text never trigger it.
#[test]
fn test_no_redirect_without_out_of_area_city() {
    for msg in [
        "Wedding in Delhi",
        "Greater Noida birthday",
        "our goal is a great party",
        "",
    ] {
        assert!(!build_fallback_reply(msg).contains(OUT_OF_AREA_SENTENCE), "{msg:?}");
    }
}

// ── Package blocks ────────────────────────────────────────────────────────────

/// Test 5: "wedding" in any case yields all three wedding tiers, with or without other categories.
#[test]
fn test_wedding_mention_lists_wedding_tiers() {
    for msg in [
        "wedding",
        "Our WEDDING budget",
        "wedding and corporate and birthday and kitty",
        "Weddings in Mumbai",
    ] {
        let reply = build_fallback_reply(msg);
        for tier in ["Intimate", "Grand Celebration", "Royal Experience"] {
            assert!(reply.contains(tier), "{msg:?} missing {tier}");
        }
    }
}

/// Test 6: multiple categories appear in the fixed order regardless of mention order.
#[test]
fn test_category_blocks_in_fixed_order() {
    let reply = build_fallback_reply("kitty party, then birthday, then corporate, then wedding");
    let pos = |label: &str| reply.find(label).unwrap_or_else(|| panic!("missing {label}"));
    assert!(pos("Wedding packages") < pos("Corporate packages"));
    assert!(pos("Corporate packages") < pos("Birthday packages"));
    assert!(pos("Birthday packages") < pos("Kitty Party packages"));
}

/// Test 7: a bare pricing question shows the wedding block only.
#[test]
fn test_pricing_without_category_shows_wedding() {
    let reply = build_fallback_reply("What are your prices?");
    assert!(reply.contains("Wedding packages"));
    assert!(!reply.contains("Corporate packages"));
}

/// Test 8: no category and no pricing means no package block.
#[test]
fn test_plain_greeting_has_no_packages() {
    let reply = build_fallback_reply("Hello, are you open on Sundays?");
    assert!(!reply.contains("packages:"));
    assert!(reply.contains("Please share your event type"));
}

/// Test 9: sections are separated by blank lines and end with the contact line.
#[test]
fn test_reply_layout() {
    let reply = build_fallback_reply("birthday in Lucknow");
    let parts: Vec<&str> = reply.split("\n\n").collect();
    assert_eq!(parts.len(), 5);
    assert!(parts[0].starts_with("Thank you for reaching out to VedicUtsav."));
    assert!(parts[1].contains(OUT_OF_AREA_SENTENCE));
    assert!(parts[2].starts_with("Birthday packages:"));
    assert!(parts[4].starts_with("You can also call or WhatsApp us"));
}

/// Test 10: city names only count as whole words, so derived forms get no redirect.
#[test]
fn test_city_match_is_whole_word() {
    assert!(build_fallback_reply("Mumbai's best planners").contains(OUT_OF_AREA_SENTENCE));
    for msg in ["Mumbaikar family reunion", "Puneites welcome", "goal: a great party"] {
        assert!(!build_fallback_reply(msg).contains(OUT_OF_AREA_SENTENCE), "{msg:?}");
    }
}
