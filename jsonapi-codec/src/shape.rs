//! Runtime type descriptors used to pick a converter without doing any I/O

use serde_json::{Map, Value};
use std::fmt;

/// Scalar categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// `true` / `false`
    Bool,
    /// Integral numbers
    Integer,
    /// Floating point numbers
    Float,
    /// Strings
    String,
}

/// Shape of a native type as seen by the converters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Scalar attribute value
    Scalar(ScalarKind),
    /// Untyped JSON value
    Any,
    /// String-keyed map
    Map,
    /// Resource object or identifier, named by its native type
    Resource(&'static str),
    /// Ordered collection of the inner shape
    List(Box<Shape>),
}

impl Shape {
    /// True for resource-object-shaped types
    pub fn is_resource(&self) -> bool {
        matches!(self, Shape::Resource(_))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar(kind) => write!(f, "{:?}", kind),
            Shape::Any => f.write_str("any"),
            Shape::Map => f.write_str("map"),
            Shape::Resource(name) => write!(f, "resource {}", name),
            Shape::List(inner) => write!(f, "list of {}", inner),
        }
    }
}

/// Types that can report their [`Shape`]
pub trait Describe {
    /// Shape of `Self`
    fn shape() -> Shape;
}

macro_rules! describe_scalar {
    ($kind:ident => $($ty:ty),+) => {
        $(
            impl Describe for $ty {
                fn shape() -> Shape {
                    Shape::Scalar(ScalarKind::$kind)
                }
            }
        )+
    };
}

describe_scalar!(Bool => bool);
describe_scalar!(Integer => i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);
describe_scalar!(Float => f32, f64);
describe_scalar!(String => String);

impl Describe for Value {
    fn shape() -> Shape {
        Shape::Any
    }
}

impl Describe for Map<String, Value> {
    fn shape() -> Shape {
        Shape::Map
    }
}
