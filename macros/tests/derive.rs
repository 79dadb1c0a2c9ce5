use cellgrid_codec::{Cell, Error, Shape, Sheet, StructShape, Value};
use chrono::{DateTime, Utc};

#[derive(Debug, Default, PartialEq, Sheet)]
struct Event {
    #[sheet(rename = "when", datetime)]
    at: DateTime<Utc>,
    #[sheet(csv)]
    tags: Vec<String>,
    #[sheet(skip)]
    cache: Vec<u8>,
    #[sheet(rename = "hidden", skip)]
    secret: String,
    count: Option<u16>,
}

#[test]
fn test_shape() {
    let shape = Event::shape();
    let shape = shape.as_struct().unwrap();
    assert!(shape.name().ends_with("Event"));

    let keys: Vec<_> = shape.fields().iter().map(|f| f.key()).collect();
    assert_eq!(keys, vec!["when", "tags", "count"]);
    assert!(shape.fields()[0].options().is_datetime());
    assert!(shape.fields()[1].options().is_packed());
    assert_eq!(shape.fields()[2].shape(), &Option::<u16>::shape());

    assert!(shape.is_excluded("cache"));
    assert!(shape.is_excluded("secret"));
    let excluded: Vec<_> = shape.excluded().iter().map(|f| f.key()).collect();
    assert_eq!(excluded, vec!["cache", "hidden"]);
}

#[test]
fn test_value_round_trip() {
    let event = Event {
        at: DateTime::<Utc>::default(),
        tags: vec!["a".into()],
        cache: vec![1, 2],
        secret: "s".into(),
        count: Some(3),
    };
    let value = event.to_value();
    let Value::Struct(fields) = &value else {
        panic!("expected struct value");
    };
    assert_eq!(fields.len(), 3);
    assert_eq!(
        fields[2],
        Value::Optional(Some(Box::new(Value::Scalar(Cell::U16(3)))))
    );

    // Skipped fields come back as their default.
    let rebuilt = Event::from_value(value).unwrap();
    assert_eq!(rebuilt.tags, event.tags);
    assert_eq!(rebuilt.count, event.count);
    assert!(rebuilt.cache.is_empty());
    assert!(rebuilt.secret.is_empty());
}

#[test]
fn test_from_value_mismatch() {
    assert!(matches!(
        Event::from_value(Value::Struct(Vec::new())),
        Err(Error::Mismatch(_))
    ));
    assert!(Event::from_value(Value::Scalar(Cell::Empty)).is_err());
}

#[derive(Debug, Default, PartialEq, Sheet)]
struct Wrapper<T> {
    inner: T,
    rows: Vec<T>,
}

#[derive(Debug, Default, PartialEq, Sheet)]
struct Empty {}

#[test]
fn test_generic_and_empty() {
    let shape = Wrapper::<u8>::shape();
    let shape = shape.as_struct().unwrap();
    assert_eq!(shape.fields().len(), 2);
    assert_ne!(shape.name(), Wrapper::<i8>::shape().as_struct().unwrap().name());

    let wrapper = Wrapper {
        inner: 1u8,
        rows: vec![2, 3],
    };
    assert_eq!(Wrapper::from_value(wrapper.to_value()).unwrap(), wrapper);

    assert_eq!(
        Empty::shape(),
        Shape::Struct(StructShape::new(std::any::type_name::<Empty>()))
    );
    assert_eq!(Empty::from_value(Empty {}.to_value()).unwrap(), Empty {});
}
