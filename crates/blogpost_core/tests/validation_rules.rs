use blogpost_core::validation::{
    validate_author_name, validate_phone_number, validate_post_category, validate_post_content,
    validate_post_summary, validate_post_title,
};
use blogpost_core::{Author, ContentPolicy, InvalidValue, Post, PostDraft};

fn policy() -> ContentPolicy {
    ContentPolicy::default()
}

#[test]
fn blank_and_whitespace_names_are_rejected() {
    for name in ["", " ", "\t", "  \n  "] {
        let err = validate_author_name(name).unwrap_err();
        assert_eq!(err.to_string(), "Author must have a name.");
    }
    validate_author_name("Jane Doe").unwrap();
}

#[test]
fn phone_number_must_be_exactly_ten_digits() {
    let policy = policy();
    validate_phone_number("1234567890", &policy).unwrap();

    for phone in ["123", "12345678901", "123-456-7890", "", "12345abcde"] {
        let err = validate_phone_number(phone, &policy).unwrap_err();
        assert_eq!(err.to_string(), "Phone number must be exactly 10 digits.");
    }
}

#[test]
fn phone_number_accepts_digits_from_other_scripts() {
    let policy = policy();
    let author = Author::new("Jane Doe", "٠١٢٣٤٥٦٧٨٩", &policy).unwrap();
    assert_eq!(author.phone_number, "٠١٢٣٤٥٦٧٨٩");
    assert!(validate_phone_number("١٢٣", &policy).is_err());
}

#[test]
fn content_length_boundary_is_250() {
    let policy = policy();
    let err = validate_post_content(&"a".repeat(249), &policy).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Post content must be at least 250 characters long."
    );
    validate_post_content(&"a".repeat(250), &policy).unwrap();
}

#[test]
fn summary_length_boundary_is_250() {
    let policy = policy();
    validate_post_summary("", &policy).unwrap();
    validate_post_summary(&"s".repeat(250), &policy).unwrap();
    let err = validate_post_summary(&"s".repeat(251), &policy).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Post summary must be at most 250 characters long."
    );
}

#[test]
fn category_accepts_only_exact_values() {
    let policy = policy();
    validate_post_category("Fiction", &policy).unwrap();
    validate_post_category("Non-Fiction", &policy).unwrap();

    for category in ["fiction", "Sci-Fi", "", "Fiction "] {
        let err = validate_post_category(category, &policy).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Category must be either 'Fiction' or 'Non-Fiction'."
        );
    }
}

#[test]
fn title_needs_a_marker_phrase() {
    let policy = policy();
    for title in [
        "Top 10 Facts",
        "You Won't Believe This",
        "The Secret Garden",
        "Guess Who",
    ] {
        validate_post_title(title, &policy).unwrap();
    }

    let err = validate_post_title("A Quiet Afternoon", &policy).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Title must be clickbait-y and contain one of the following: Won't Believe, Secret, Top, Guess"
    );
    // case-sensitive
    assert!(validate_post_title("top picks", &policy).is_err());
}

#[test]
fn author_constructor_fails_fast_on_name_first() {
    let err = Author::new("   ", "123", &policy()).unwrap_err();
    assert_eq!(err, InvalidValue::BlankAuthorName);
}

#[test]
fn setters_leave_entity_unchanged_on_failure() {
    let policy = policy();
    let mut author = Author::new("Jane Doe", "5551234567", &policy).unwrap();

    assert!(author.set_phone_number("555", &policy).is_err());
    assert_eq!(author.phone_number, "5551234567");
    assert!(author.set_name(" ").is_err());
    assert_eq!(author.name, "Jane Doe");

    let mut post = Post::new(valid_draft(), &policy).unwrap();
    assert!(post.set_category("Sci-Fi", &policy).is_err());
    assert_eq!(post.category, "Fiction");
    assert!(post.set_content("short", &policy).is_err());
    assert_eq!(post.content.chars().count(), 300);
}

#[test]
fn post_constructor_reports_title_before_other_fields() {
    let draft = PostDraft {
        title: "A Quiet Afternoon".to_string(),
        content: "too short".to_string(),
        ..valid_draft()
    };
    let err = Post::new(draft, &policy()).unwrap_err();
    assert_eq!(err.field(), "title");
}

#[test]
fn custom_policy_changes_rules_and_messages() {
    let policy = ContentPolicy {
        title_phrases: vec!["Breaking".to_string()],
        categories: vec!["Poetry".to_string()],
        min_content_chars: 10,
        max_summary_chars: 5,
        phone_digits: 7,
    };

    validate_post_title("Breaking: rain", &policy).unwrap();
    assert!(validate_post_title("Top 10 Facts", &policy).is_err());
    validate_post_category("Poetry", &policy).unwrap();
    assert_eq!(
        validate_post_category("Fiction", &policy)
            .unwrap_err()
            .to_string(),
        "Category must be 'Poetry'."
    );
    validate_phone_number("5551234", &policy).unwrap();
    assert_eq!(
        validate_phone_number("5551234567", &policy)
            .unwrap_err()
            .to_string(),
        "Phone number must be exactly 7 digits."
    );
    assert!(validate_post_summary("123456", &policy).is_err());
}

fn valid_draft() -> PostDraft {
    PostDraft {
        title: "The Secret You Never Knew".to_string(),
        content: "x".repeat(300),
        summary: "y".repeat(100),
        category: "Fiction".to_string(),
        author_id: None,
    }
}
