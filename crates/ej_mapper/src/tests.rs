use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::cell::OnceCell;

use ej_exclusion::{ClassDescriptor, ExclusionConfiguration, FieldDescriptor, Modifiers};
use ej_exclusion::{SkipClasses, SkipFieldNames};
use ej_node::{JsonNode, JsonObject, NodeKind};

use crate::derive::Mappable;
use crate::{CycleDetectedError, Error, FromTreeContext, Mappable, Mapper, MappableRef};
use crate::{MappingError, Record, Result, from_tree, to_tree};

// -----------------------------------------------------------------------------
// Records

#[derive(Mappable, Default, Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Mappable, Default, Debug, PartialEq)]
#[mapping(type_path = "app::User")]
struct User {
    #[mapping(rename = "userName")]
    name: String,
    age: u8,
    tags: Vec<String>,
    home: Option<Point>,
    #[mapping(modifiers(transient))]
    session: u64,
    #[mapping(modifiers(private, static))]
    instances: u32,
    extra: JsonNode,
}

#[derive(Mappable, Default, Debug, PartialEq)]
#[mapping(nesting = "inner")]
struct Engine {
    power: u32,
}

#[derive(Mappable, Default, Debug, PartialEq)]
struct Car {
    engine: Engine,
    name: String,
}

#[derive(Mappable, Default, Debug, PartialEq)]
struct Marker;

#[derive(Mappable, Default, Debug, PartialEq)]
struct Token {
    r#type: String,
}

fn ann() -> User {
    User {
        name: "ann".to_string(),
        age: 30,
        tags: vec!["a".to_string()],
        home: Some(Point { x: 1, y: 2 }),
        session: 9,
        instances: 3,
        extra: JsonNode::Null,
    }
}

fn object<const N: usize>(entries: [(&str, JsonNode); N]) -> JsonNode {
    JsonObject::from_iter(entries).into()
}

fn has_key(tree: &JsonNode, key: &str) -> bool {
    tree.as_object().is_some_and(|object| object.contains_key(key))
}

fn mapping_error(err: Error) -> MappingError {
    match err {
        Error::Mapping(err) => err,
        other => panic!("expected a mapping error, got {other}"),
    }
}

// -----------------------------------------------------------------------------
// Derived records

#[test]
fn record_round_trip() {
    let config = ExclusionConfiguration::new();
    let point = Point { x: 1, y: 2 };

    let tree = to_tree(&point, &config).unwrap();
    assert_eq!(tree.to_string(), r#"{"x":1,"y":2}"#);
    assert_eq!(from_tree::<Point>(&tree, &config).unwrap(), point);
}

#[test]
fn descriptors() {
    let user = ann();
    let fields = user.fields();
    assert_eq!(fields.len(), 7);
    assert_eq!(fields[0].name(), "userName");
    assert_eq!(fields[0].declaring_type(), "app::User");
    assert!(fields[4].modifiers().contains(Modifiers::TRANSIENT));
    assert_eq!(fields[5].modifiers(), Modifiers::PRIVATE | Modifiers::STATIC);
    assert_eq!(fields[3].declared_type().type_path(), "ej_mapper::tests::Point");
    assert_eq!(user.class().type_path(), "app::User");
    assert!(matches!(user.classify(), MappableRef::Record(_)));
}

#[test]
fn static_and_transient_fields_are_skipped() {
    let config = ExclusionConfiguration::new();
    let tree = to_tree(&ann(), &config).unwrap();
    assert_eq!(
        tree.to_string(),
        r#"{"userName":"ann","age":30,"tags":["a"],"home":{"x":1,"y":2},"extra":null}"#
    );

    let back: User = from_tree(&tree, &config).unwrap();
    assert_eq!(back.session, 0);
    assert_eq!(back.instances, 0);
    assert_eq!(back.home, Some(Point { x: 1, y: 2 }));
}

#[test]
fn exact_modifiers_keep_transient_fields() {
    let config = ExclusionConfiguration::new().with_exact_modifiers(Modifiers::PRIVATE);
    let tree = to_tree(&ann(), &config).unwrap();
    assert_eq!(tree["session"].as_u64(), Some(9));
    assert!(!has_key(&tree, "instances"));

    let back: User = from_tree(&tree, &config).unwrap();
    assert_eq!(back.session, 9);
}

#[test]
fn missing_keys_keep_defaults() {
    let config = ExclusionConfiguration::new();
    let tree = object([("userName", JsonNode::from("bob"))]);
    let user: User = from_tree(&tree, &config).unwrap();
    assert_eq!(
        user,
        User {
            name: "bob".to_string(),
            ..User::default()
        }
    );
}

#[test]
fn raw_identifiers_and_unit_records() {
    let config = ExclusionConfiguration::new();
    let token = Token {
        r#type: "id".to_string(),
    };
    assert_eq!(to_tree(&token, &config).unwrap().to_string(), r#"{"type":"id"}"#);

    assert_eq!(to_tree(&Marker, &config).unwrap().to_string(), "{}");
    let err = from_tree::<Marker>(&JsonNode::from_iter([1]), &config).unwrap_err();
    assert!(matches!(
        mapping_error(err),
        MappingError::Mismatch { expected: "object", found: NodeKind::Array, .. }
    ));
}

#[test]
fn mismatch_reports_the_path() {
    let config = ExclusionConfiguration::new();
    let engine = object([("power", JsonNode::from("high"))]);
    let tree = object([("engine", engine), ("name", JsonNode::from("c"))]);

    let err = mapping_error(from_tree::<Car>(&tree, &config).unwrap_err());
    assert_eq!(
        err,
        MappingError::Mismatch {
            expected: "integer",
            found: NodeKind::String,
            path: "$.engine.power".to_string(),
        }
    );
}

#[test]
fn tree_fields_pass_through() {
    let config = ExclusionConfiguration::new();
    let payload = object([("deep", JsonNode::from_iter([JsonNode::from(1), JsonNode::Null]))]);
    let tree = object([("userName", JsonNode::from("eve")), ("extra", payload.clone())]);

    let user: User = from_tree(&tree, &config).unwrap();
    assert_eq!(user.extra, payload);
    assert_eq!(to_tree(&user, &config).unwrap()["extra"], payload);
}

// -----------------------------------------------------------------------------
// Exclusion

#[test]
fn inner_types_follow_the_toggle() {
    let car = Car {
        engine: Engine { power: 90 },
        name: "c".to_string(),
    };

    let config = ExclusionConfiguration::new();
    let tree = to_tree(&car, &config).unwrap();
    assert_eq!(tree.to_string(), r#"{"engine":{"power":90},"name":"c"}"#);

    let disabled = config.disable_inner_class_serialization();
    assert_eq!(to_tree(&car, &disabled).unwrap().to_string(), r#"{"name":"c"}"#);
    assert!(to_tree(&car.engine, &disabled).unwrap().is_null());

    let back: Car = from_tree(&tree, &disabled).unwrap();
    assert_eq!(back.engine, Engine::default());
    assert_eq!(back.name, "c");
}

#[test]
fn strategies_apply_per_direction() {
    let config = ExclusionConfiguration::new().with_exclusion_strategy(
        SkipFieldNames::new(["age"]).declared_in("app::User"),
        true,
        false,
    );

    let tree = to_tree(&ann(), &config).unwrap();
    assert!(!has_key(&tree, "age"));

    let mut tree = tree;
    if let Some(object) = tree.as_object_mut() {
        object.insert("age", JsonNode::from(41));
    }
    let back: User = from_tree(&tree, &config).unwrap();
    assert_eq!(back.age, 41);
}

#[test]
fn excluded_classes() {
    let config = ExclusionConfiguration::new().with_exclusion_strategy(
        SkipClasses::new(["ej_mapper::tests::Point"]),
        true,
        true,
    );

    assert!(to_tree(&Point { x: 1, y: 2 }, &config).unwrap().is_null());

    let tree = to_tree(&ann(), &config).unwrap();
    assert!(!has_key(&tree, "home"));
    assert_eq!(tree["userName"].as_str(), Some("ann"));

    let tree = object([("home", object([("x", JsonNode::from(5))]))]);
    let back: User = from_tree(&tree, &config).unwrap();
    assert_eq!(back.home, None);
}

// -----------------------------------------------------------------------------
// Shared references

/// A record whose field may point back at an earlier value.
struct Link {
    next: OnceCell<&'static Link>,
}

static LINK_FIELDS: [FieldDescriptor; 1] =
    [FieldDescriptor::new("next", "tests::Link", ClassDescriptor::unknown::<Link>)];

impl Mappable for Link {
    fn classify(&self) -> MappableRef<'_> {
        MappableRef::Record(self)
    }

    fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
        Err(cx.mismatch("link", node).into())
    }
}

impl Record for Link {
    fn class(&self) -> ClassDescriptor {
        ClassDescriptor::new("tests::Link")
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        &LINK_FIELDS
    }

    fn field(&self, index: usize) -> Option<&dyn Mappable> {
        match index {
            0 => self.next.get().map(|next| *next as &dyn Mappable),
            _ => None,
        }
    }
}

fn leak_link() -> &'static Link {
    Box::leak(Box::new(Link {
        next: OnceCell::new(),
    }))
}

#[test]
fn chains_are_written() {
    let head = leak_link();
    let tail = leak_link();
    assert!(head.next.set(tail).is_ok());

    let config = ExclusionConfiguration::new();
    let mapper = Mapper::new(&config);
    let tree = mapper.to_tree_dyn(head).unwrap();
    assert_eq!(tree.to_string(), r#"{"next":{"next":null}}"#);
}

#[test]
fn cycles_fail_without_partial_output() {
    let head = leak_link();
    let tail = leak_link();
    assert!(head.next.set(tail).is_ok());
    assert!(tail.next.set(head).is_ok());

    let config = ExclusionConfiguration::new();
    match to_tree(head, &config) {
        Err(Error::CycleDetected(CycleDetectedError { type_path, path })) => {
            assert_eq!(type_path, "ej_mapper::tests::Link");
            assert_eq!(path, "$.next.next");
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
}

// -----------------------------------------------------------------------------
// Foreign trees

#[cfg(feature = "serde_json")]
mod foreign_trees {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use ej_exclusion::ExclusionConfiguration;
    use ej_node::JsonNode;
    use serde_json::json;

    use super::{Point, ann};
    use crate::Mapper;
    use crate::derive::Mappable;
    use crate::foreign::SerdeJsonAdapter;

    #[derive(Mappable, Default, Debug, PartialEq)]
    struct Sample {
        a: Vec<i32>,
        b: Option<String>,
    }

    #[test]
    fn value_to_record_and_back() {
        let config = ExclusionConfiguration::new();
        let mapper = Mapper::new(&config);

        let value = json!({"a": [1, 2, 3], "b": null});
        let node = mapper.from_foreign(&value, &SerdeJsonAdapter).unwrap();
        let sample: Sample = mapper.from_tree(&node).unwrap();
        assert_eq!(
            sample,
            Sample {
                a: vec![1, 2, 3],
                b: None
            }
        );

        let tree = mapper.to_tree(&sample).unwrap();
        assert_eq!(mapper.to_foreign(&tree, &SerdeJsonAdapter), value);
    }

    #[test]
    fn record_through_text() {
        let config = ExclusionConfiguration::new();
        let mapper = Mapper::new(&config);

        let text = serde_json::to_string(&mapper.to_tree(&ann()).unwrap()).unwrap();
        let node: JsonNode = serde_json::from_str(&text).unwrap();
        let point: Point = mapper.from_tree(&node["home"]).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }
}
