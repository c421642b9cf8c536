//! Redaction engine behavior: wholesale masking, substring rewrites,
//! structural cloning and non-mutation of the caller's data.

use proptest::prelude::*;
use scrublog::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Redact)]
struct Account {
    id: i64,
    name: String,
    label: String,
}

#[derive(Debug, Clone, PartialEq, Redact)]
struct Team {
    owner: Account,
    size: u32,
}

fn chain(filter: impl Filter + 'static) -> FilterChain {
    FilterChain::new().with(filter)
}

#[test]
fn value_filter_rewrites_every_occurrence() {
    let filters = chain(ValueFilter::new("blue"));
    let copy = "blue is blue".to_owned().redact(&filters, "", "");
    assert_eq!(copy, format!("{FILTERED_LABEL} is {FILTERED_LABEL}"));
}

#[test]
fn substring_rewrite_is_independent_of_masking() {
    let filters = chain(ValueFilter::new("token1"));
    let copy = "Authorization: Bearer token1"
        .to_owned()
        .redact(&filters, "authorization", "");
    assert_eq!(copy, format!("Authorization: Bearer {FILTERED_LABEL}"));
}

#[test]
fn field_filter_masks_wholesale_and_leaves_siblings() {
    let filters = chain(FieldFilter::new("name"));
    let account = Account {
        id: 100,
        name: "blue".to_owned(),
        label: "five".to_owned(),
    };

    let copy = account.redact(&filters, "", "");
    assert_eq!(copy.name, FILTERED_LABEL);
    assert_eq!(copy.label, "five");
    assert_eq!(copy.id, 100);
}

#[test]
fn original_value_is_never_modified() {
    let filters = chain(ValueFilter::new("blue"));
    let account = Account {
        id: 100,
        name: "blue".to_owned(),
        label: "five".to_owned(),
    };
    let before = account.clone();

    let copy = account.redact(&filters, "", "");
    assert_eq!(copy.name, FILTERED_LABEL);
    assert_eq!(account, before);
}

#[test]
fn nested_struct_fields_are_walked() {
    let filters = chain(FieldFilter::new("name"));
    let team = Team {
        owner: Account {
            id: 1,
            name: "blue".to_owned(),
            label: "five".to_owned(),
        },
        size: 3,
    };

    let copy = team.redact(&filters, "", "");
    assert_eq!(copy.owner.name, FILTERED_LABEL);
    assert_eq!(copy.owner.label, "five");
    assert_eq!(copy.size, 3);
}

#[test]
fn map_values_are_walked_under_their_keys() {
    let filters = chain(ValueFilter::new("blue"));
    let mut data: HashMap<String, Box<Account>> = HashMap::new();
    data.insert(
        "xyz".to_owned(),
        Box::new(Account {
            id: 1,
            name: "blue".to_owned(),
            label: "five".to_owned(),
        }),
    );

    let copy = data.redact(&filters, "", "");
    assert_eq!(copy["xyz"].name, FILTERED_LABEL);
    assert_eq!(copy["xyz"].label, "five");
    assert_eq!(data["xyz"].name, "blue");
}

#[test]
fn sequence_elements_are_walked_individually() {
    let filters = chain(ValueFilter::new("blue"));
    let data = vec![
        Account {
            id: 1,
            name: "orange".to_owned(),
            label: "five".to_owned(),
        },
        Account {
            id: 2,
            name: "blue".to_owned(),
            label: "five".to_owned(),
        },
    ];

    let copy = data.redact(&filters, "", "");
    assert_eq!(copy[0].name, "orange");
    assert_eq!(copy[1].name, FILTERED_LABEL);
    assert_eq!(copy[1].label, "five");
}

#[test]
fn boxed_elements_yield_distinct_pointers() {
    let filters = FilterChain::new();
    let data = vec![Box::new(Account {
        id: 1,
        name: "orange".to_owned(),
        label: "five".to_owned(),
    })];

    let copy = data.redact(&filters, "", "");
    assert_eq!(*copy[0], *data[0]);
    assert!(!std::ptr::eq(&*copy[0], &*data[0]));
}

#[test]
fn absent_optional_stays_absent() {
    let filters = chain(FieldFilter::new("name"));

    #[derive(Debug, Clone, PartialEq, Redact)]
    struct Profile {
        name: Option<String>,
        nickname: Option<Box<String>>,
    }

    let profile = Profile {
        name: None,
        nickname: None,
    };
    let copy = profile.redact(&filters, "", "");
    assert_eq!(copy.name, None);
    assert_eq!(copy.nickname, None);

    let profile = Profile {
        name: Some("blue".to_owned()),
        nickname: Some(Box::new("b".to_owned())),
    };
    let copy = profile.redact(&filters, "", "");
    assert_eq!(copy.name.as_deref(), Some(FILTERED_LABEL));
    assert_eq!(copy.nickname.as_deref(), Some(&"b".to_owned()));
}

#[test]
fn field_prefix_filter_masks_matching_fields() {
    #[derive(Debug, Clone, PartialEq, Redact)]
    struct Config {
        secret_token: String,
        secret_seed: i64,
        endpoint: String,
    }

    let filters = chain(FieldPrefixFilter::new("secret_"));
    let config = Config {
        secret_token: "t0ps3cret".to_owned(),
        secret_seed: 99,
        endpoint: "https://example.com".to_owned(),
    };

    let copy = config.redact(&filters, "", "");
    assert_eq!(copy.secret_token, FILTERED_LABEL);
    assert_eq!(copy.secret_seed, 0);
    assert_eq!(copy.endpoint, "https://example.com");
}

#[test]
fn type_filter_masks_by_concrete_type() {
    #[derive(Debug, Clone, PartialEq, Redact)]
    struct AccessToken(String);

    #[derive(Debug, Clone, PartialEq, Redact)]
    struct Session {
        token: AccessToken,
        user: String,
    }

    let filters = chain(TypeFilter::of::<AccessToken>());
    let session = Session {
        token: AccessToken("t0ps3cret".to_owned()),
        user: "alice".to_owned(),
    };

    let copy = session.redact(&filters, "", "");
    assert_eq!(copy.token.0, FILTERED_LABEL);
    assert_eq!(copy.user, "alice");
}

#[test]
fn tag_filter_masks_tagged_fields_only() {
    #[derive(Debug, Clone, PartialEq, Redact)]
    struct Signup {
        email: String,
        #[redact(tag = "secure")]
        password: String,
    }

    let filters = chain(TagFilter::new());
    let signup = Signup {
        email: "alice@example.com".to_owned(),
        password: "hunter2".to_owned(),
    };

    let copy = signup.redact(&filters, "", "");
    assert_eq!(copy.email, "alice@example.com");
    assert_eq!(copy.password, FILTERED_LABEL);
}

#[test]
fn skipped_fields_are_copied_verbatim() {
    #[derive(Debug, Clone, PartialEq, Redact)]
    struct Internal {
        password: String,
        #[redact(skip)]
        raw_password: String,
    }

    // Both field names match, but the skipped field bypasses the engine.
    let filters = FilterChain::new()
        .with(FieldFilter::new("password"))
        .with(FieldFilter::new("raw_password"));
    let value = Internal {
        password: "hunter2".to_owned(),
        raw_password: "hunter2".to_owned(),
    };

    let copy = value.redact(&filters, "", "");
    assert_eq!(copy.password, FILTERED_LABEL);
    assert_eq!(copy.raw_password, "hunter2");
}

#[test]
fn pattern_filter_rewrites_matches() {
    let filters = chain(PatternFilter::phone_number());
    let copy = "call 090-1234-5678 or 03-1111-2222"
        .to_owned()
        .redact(&filters, "", "");
    assert_eq!(copy, format!("call {FILTERED_LABEL} or {FILTERED_LABEL}"));
}

#[test]
fn empty_chain_is_identity_for_nested_shapes() {
    let filters = FilterChain::new();

    let team = Team {
        owner: Account {
            id: 7,
            name: "blue".to_owned(),
            label: "five".to_owned(),
        },
        size: 12,
    };
    assert_eq!(team.redact(&filters, "", ""), team);

    let mut map: HashMap<String, Vec<Option<i64>>> = HashMap::new();
    map.insert("a".to_owned(), vec![Some(1), None]);
    assert_eq!(map.redact(&filters, "", ""), map);

    let array = [1_u8, 2, 3];
    assert_eq!(array.redact(&filters, "", ""), array);
}

proptest! {
    #[test]
    fn prop_empty_chain_is_identity_for_strings(s in ".*") {
        let filters = FilterChain::new();
        prop_assert_eq!(s.redact(&filters, "field", ""), s);
    }

    #[test]
    fn prop_empty_chain_is_identity_for_vecs(values in proptest::collection::vec(any::<i64>(), 0..32)) {
        let filters = FilterChain::new();
        prop_assert_eq!(values.redact(&filters, "field", ""), values);
    }

    #[test]
    fn prop_masking_never_mutates_the_original(name in ".*", label in ".*", id in any::<i64>()) {
        let filters = FilterChain::new().with(FieldFilter::new("name"));
        let account = Account { id, name, label };
        let before = account.clone();

        let copy = account.redact(&filters, "", "");
        prop_assert_eq!(copy.name, FILTERED_LABEL.to_owned());
        prop_assert_eq!(&account, &before);
    }
}
