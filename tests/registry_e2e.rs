use morphkey::{Entity, KeyRegistry, KeyValue, MorphMap, TypeCatalog};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Default)]
struct User {
    id: i64,
    uuid: Option<Uuid>,
}

impl Entity for User {
    fn type_name(&self) -> &str {
        "App\\Models\\User"
    }

    fn attribute(&self, field: &str) -> Option<KeyValue> {
        match field {
            "id" => Some(KeyValue::Int(self.id)),
            "uuid" => self.uuid.map(KeyValue::Uuid),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Organization {
    ulid: String,
}

impl Entity for Organization {
    fn type_name(&self) -> &str {
        "App\\Models\\Organization"
    }

    fn default_key_name(&self) -> &str {
        "ulid"
    }

    fn attribute(&self, field: &str) -> Option<KeyValue> {
        (field == "ulid").then(|| KeyValue::from(self.ulid.as_str()))
    }
}

#[derive(Default)]
struct Comment;

impl Entity for Comment {
    fn type_name(&self) -> &str {
        "App\\Models\\Comment"
    }

    fn default_key_name(&self) -> &str {
        "comment_id"
    }

    fn attribute(&self, _field: &str) -> Option<KeyValue> {
        None
    }
}

const USER: &str = "App\\Models\\User";
const ORGANIZATION: &str = "App\\Models\\Organization";
const COMMENT: &str = "App\\Models\\Comment";

fn registry_with_aliases() -> (KeyRegistry, Arc<MorphMap>) {
    let types = TypeCatalog::new()
        .with_entity::<User>()
        .with_entity::<Organization>()
        .with_entity::<Comment>()
        .with_type("App\\Models\\Account", "id");

    let aliases = Arc::new(MorphMap::new());
    aliases.extend([
        ("user", USER),
        ("Acct", "App\\Models\\Account"),
    ]);

    let registry = KeyRegistry::builder()
        .types(Arc::new(types))
        .aliases(aliases.clone())
        .build();
    (registry, aliases)
}

#[test]
fn permissive_mapping_with_fallback() {
    let (registry, _) = registry_with_aliases();
    registry.map([(USER, "uuid"), (ORGANIZATION, "ulid")]);

    assert_eq!(registry.get_key_from_class(USER).unwrap(), "uuid");
    // Unmapped: Comment's own declared key.
    assert_eq!(registry.get_key_from_class(COMMENT).unwrap(), "comment_id");
    assert_eq!(registry.get_key(&Comment).unwrap(), "comment_id");
}

#[test]
fn enforced_mapping_reports_offending_type() {
    let (registry, _) = registry_with_aliases();
    registry.enforce([(USER, "uuid")]);

    let err = registry.get_key(&Organization::default()).unwrap_err();
    assert!(err.is_violation());
    assert_eq!(err.violated_type().unwrap(), ORGANIZATION);
    assert!(err.to_string().contains(ORGANIZATION));
}

#[test]
fn alias_resolves_before_lookup() {
    let (registry, _) = registry_with_aliases();
    registry.map([("App\\Models\\Account", "id")]);

    assert_eq!(registry.resolve_alias("Acct"), "App\\Models\\Account");
    assert_eq!(registry.get_key_from_class("Acct").unwrap(), "id");
}

#[test]
fn enforced_violation_carries_resolved_name() {
    let (registry, _) = registry_with_aliases();
    registry.require_mapping();

    let err = registry.get_key_from_class("user").unwrap_err();
    assert_eq!(err.violated_type().unwrap(), USER);
}

#[test]
fn aliases_added_later_are_seen() {
    let (registry, aliases) = registry_with_aliases();
    registry.map([(ORGANIZATION, "ulid")]);

    assert!(registry.get_key_from_class("org").unwrap_err().is_unknown_type());

    aliases.insert("org", ORGANIZATION);
    assert_eq!(registry.get_key_from_class("org").unwrap(), "ulid");
}

#[test]
fn remap_overwrites() {
    let (registry, _) = registry_with_aliases();
    registry.map([(USER, "id")]);
    registry.map([(USER, "uuid")]);

    assert_eq!(registry.get_key_from_class(USER).unwrap(), "uuid");
    assert_eq!(registry.all().len(), 1);
}

#[test]
fn values_follow_resolved_key() {
    let (registry, _) = registry_with_aliases();
    let uuid = Uuid::new_v4();
    let user = User { id: 7, uuid: Some(uuid) };
    let org = Organization {
        ulid: "01ARZ3NDEKTSV4RRFFQ69G5FAV".to_string(),
    };

    assert_eq!(registry.get_value(&user).unwrap(), Some(KeyValue::Int(7)));
    assert_eq!(
        registry.get_value(&org).unwrap(),
        Some(KeyValue::from("01ARZ3NDEKTSV4RRFFQ69G5FAV"))
    );

    registry.map([(USER, "uuid")]);
    assert_eq!(registry.get_value(&user).unwrap(), Some(KeyValue::Uuid(uuid)));
}

#[test]
fn boxed_entities_share_the_lookup_path() {
    let (registry, _) = registry_with_aliases();
    registry.enforce([(USER, "uuid"), (ORGANIZATION, "ulid")]);

    let related: Vec<Box<dyn Entity>> = vec![
        Box::new(User::default()),
        Box::new(Organization::default()),
        Box::new(Comment),
    ];

    let keys: Vec<_> = related
        .iter()
        .map(|entity| registry.get_key(entity.as_ref()).map(|k| k.into_inner()))
        .collect();

    assert_eq!(keys[0].as_deref().unwrap(), "uuid");
    assert_eq!(keys[1].as_deref().unwrap(), "ulid");
    assert!(keys[2].as_ref().unwrap_err().is_violation());
}

#[test]
fn reset_between_phases() {
    let (registry, _) = registry_with_aliases();
    registry.enforce([(USER, "uuid")]);
    assert!(registry.is_enforcing());

    registry.reset();
    assert!(!registry.is_enforcing());
    assert!(registry.all().is_empty());
    assert_eq!(registry.get_key(&Organization::default()).unwrap(), "ulid");
}

#[test]
fn isolated_instances_do_not_share_state() {
    let (a, _) = registry_with_aliases();
    let (b, _) = registry_with_aliases();

    a.enforce([(USER, "uuid")]);

    assert!(a.is_enforcing());
    assert!(!b.is_enforcing());
    assert!(!b.has(USER));
}
