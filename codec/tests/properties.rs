//! End-to-end properties of the grid codec.

use cellgrid_codec::{
    decode, encode, grid::to_text, header, Cell, Config, Decoder, Encoder, Error, Sheet,
};
use cellgrid_macros::test_traced;
use chrono::{DateTime, TimeZone, Utc};

#[derive(Debug, Default, PartialEq, Sheet)]
struct Dims {
    width: f64,
    height: f64,
}

#[derive(Debug, Default, PartialEq, Sheet)]
struct Customer {
    name: String,
    vip: Option<bool>,
}

#[derive(Debug, Default, PartialEq, Sheet)]
struct Line {
    sku: String,
    qty: u32,
    #[sheet(csv)]
    notes: Vec<Option<i16>>,
    dims: Option<Dims>,
}

#[derive(Debug, Default, PartialEq, Sheet)]
struct Invoice {
    #[sheet(rename = "invoice")]
    id: u64,
    #[sheet(datetime)]
    issued: DateTime<Utc>,
    #[sheet(datetime)]
    due: i64,
    paid: bool,
    customer: Customer,
    lines: Vec<Line>,
    slots: [Option<Dims>; 2],
    ratios: Vec<f32>,
    #[sheet(csv)]
    tags: Vec<String>,
    codes: [i8; 2],
    note: Option<String>,
    #[sheet(skip)]
    checksum: u32,
}

fn invoice() -> Invoice {
    Invoice {
        id: 42,
        issued: Utc.with_ymd_and_hms(2024, 2, 29, 12, 30, 0).unwrap(),
        due: 1_700_000_000,
        paid: true,
        customer: Customer {
            name: "ACME".into(),
            vip: Some(false),
        },
        lines: vec![
            Line {
                sku: "A-1".into(),
                qty: 3,
                notes: vec![Some(1), None, Some(-3)],
                dims: Some(Dims {
                    width: 1.5,
                    height: 0.0,
                }),
            },
            Line {
                sku: "B-2".into(),
                qty: 0,
                notes: Vec::new(),
                dims: None,
            },
        ],
        slots: [
            None,
            Some(Dims {
                width: 2.0,
                height: 3.25,
            }),
        ],
        ratios: vec![0.5, 2.25, 0.0],
        tags: vec!["net".into(), "eu".into()],
        codes: [-1, 0],
        note: Some("memo".into()),
        checksum: 7,
    }
}

#[test_traced]
fn test_round_trip() {
    let value = invoice();
    let grid = encode(&value).unwrap();
    let schema = header::schema::<Invoice>();
    assert_eq!(schema[0].len(), grid[0].len());

    let decoded: Invoice = decode(&schema, &to_text(&grid)).unwrap();
    assert_eq!(
        decoded,
        Invoice {
            checksum: 0,
            ..value
        }
    );
}

#[test]
fn test_round_trip_custom_config() {
    let cfg = Config::default()
        .with_separator(';')
        .with_index_key("#")
        .with_datetime_format("%d.%m.%Y %H:%M")
        .with_datetime_layouts(["%d.%m.%Y %H:%M"]);
    let value = invoice();
    let grid = Encoder::with_config(cfg.clone()).encode(&value).unwrap();
    assert_eq!(grid[0][1], Cell::from("29.02.2024 12:30"));
    assert!(grid[0].contains(&Cell::from("net;eu")));

    let schema = header::schema_with_config::<Invoice>(&cfg);
    assert!(schema[1].contains(&"#".to_string()));
    let decoded: Invoice = Decoder::with_config(&schema, cfg)
        .decode(&to_text(&grid))
        .unwrap();
    assert_eq!(decoded.issued, value.issued);
    assert_eq!(decoded.due, 1_699_999_980);
    assert_eq!(decoded.tags, value.tags);
    assert_eq!(decoded.lines, value.lines);
}

#[test]
fn test_unset_optional_round_trip() {
    let value = Invoice {
        lines: vec![Line::default()],
        slots: [None, None],
        note: None,
        customer: Customer {
            name: "x".into(),
            vip: None,
        },
        ..Invoice::default()
    };
    let grid = encode(&value).unwrap();
    let decoded: Invoice = decode(&header::schema::<Invoice>(), &to_text(&grid)).unwrap();
    assert_eq!(decoded, value);
}

#[derive(Debug, Default, PartialEq, Sheet)]
struct Point {
    x: i32,
    y: i32,
    z: i32,
}

#[derive(Debug, Default, PartialEq, Sheet)]
struct Placed {
    label: String,
    point: Point,
    sibling: u8,
    origin: Option<Point>,
}

#[test]
fn test_blank_tolerance() {
    let schema = header::schema::<Placed>();
    let values = vec![vec!["", "1", "", "3", ""]];
    let placed: Placed = decode(&schema, &values).unwrap();
    assert_eq!(placed.label, "");
    assert_eq!(placed.point, Point { x: 1, y: 0, z: 3 });
    assert_eq!(placed.sibling, 0);
}

#[test]
fn test_optional_presence() {
    let schema = header::schema::<Placed>();

    let values = vec![vec!["a", "1", "2", "3", "4", "", "", ""]];
    let placed: Placed = decode(&schema, &values).unwrap();
    assert_eq!(placed.origin, None);

    let values = vec![vec!["a", "1", "2", "3", "4", "", "", "0"]];
    let placed: Placed = decode(&schema, &values).unwrap();
    assert_eq!(placed.origin, Some(Point::default()));
}

#[test]
fn test_struct_flattening_width() {
    let placed = Placed {
        label: "p".into(),
        point: Point { x: 1, y: 2, z: 3 },
        sibling: 9,
        origin: None,
    };
    let grid = encode(&placed).unwrap();
    // The point is anchored at column 1, so its sibling lands at column 4.
    assert_eq!(grid[0][4], Cell::U8(9));

    let schema = header::schema::<Placed>();
    assert_eq!(schema[0][4], "sibling");
    let decoded: Placed = decode(&schema, &to_text(&grid)).unwrap();
    assert_eq!(decoded.sibling, 9);
    assert_eq!(decoded.point, placed.point);
}

#[derive(Debug, Default, PartialEq, Sheet)]
struct Packed {
    #[sheet(csv)]
    values: Vec<i64>,
}

#[test]
fn test_packed_list() {
    let value = Packed {
        values: vec![10, -20, 30],
    };
    let grid = encode(&value).unwrap();
    assert_eq!(grid, vec![vec![Cell::from("10,-20,30")]]);

    let decoded: Packed = decode(&[vec!["values:csv"]], &to_text(&grid)).unwrap();
    assert_eq!(decoded, value);
}

#[derive(Debug, Default, PartialEq, Sheet)]
struct Series {
    points: Vec<u16>,
}

#[test]
fn test_gap_densification() {
    let values = vec![vec!["5"], vec![""], vec!["7"]];
    let series: Series = decode(&[vec!["points"]], &values).unwrap();
    assert_eq!(series.points, vec![5, 0, 7]);
}

#[derive(Debug, Default, PartialEq, Sheet)]
struct Account {
    user: String,
    #[sheet(skip)]
    password: String,
    #[sheet(rename = "pin", skip)]
    code: u16,
    active: bool,
}

#[test_traced("TRACE")]
fn test_exclusion() {
    let account = Account {
        user: "u".into(),
        password: "hunter2".into(),
        code: 1234,
        active: true,
    };
    let grid = encode(&account).unwrap();
    assert_eq!(grid, vec![vec![Cell::from("u"), Cell::Bool(true)]]);
    assert_eq!(header::keys::<Account>(), vec!["user", "active"]);

    let schema = vec![vec!["user", "password", "pin", "code", "active"]];
    let values = vec![vec!["v", "secret", "1", "2", "false"]];
    let decoded: Account = decode(&schema, &values).unwrap();
    assert_eq!(
        decoded,
        Account {
            user: "v".into(),
            ..Account::default()
        }
    );
}

#[test]
fn test_fatal_parse_propagation() {
    let schema = vec![vec!["label", "point", "", "", "sibling"], vec!["", "x", "y", "z"]];
    let values = vec![vec!["ok", "1", "two", "3", "4"]];
    let err = decode::<Placed, _, _>(&schema, &values).unwrap_err();
    assert_eq!(
        err,
        Error::Parse {
            kind: "i32",
            text: "two".into(),
            row: 0,
            column: 2,
        }
    );
    assert_eq!(err.to_string(), "cannot parse \"two\" as i32 at (0, 2)");

    let values = vec![vec!["ok", "1", "2", "3", "256"]];
    assert!(matches!(
        decode::<Placed, _, _>(&schema, &values),
        Err(Error::Parse { kind: "u8", .. })
    ));
}
