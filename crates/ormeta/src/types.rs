use derive_more::Display;
use serde::Serialize;

///
/// DataType
///
/// Storage-facing value tag carried by each property mapping.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum DataType {
    Blob,
    Bool,
    Date,
    DateTime,
    Float32,
    Float64,
    Int32,
    Int64,
    List,
    Reference,
    Text,
    Time,
    Uint32,
    Uint64,
    Uuid,
}

impl DataType {
    /// Tag used to persist enumeration values.
    pub const ENUMERATION: Self = Self::Int32;
}

///
/// Container
///
/// Multi-value container capability. Any container unwraps to its element
/// type for relationship inference.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum Container {
    Deque,
    List,
    OrderedSet,
    Set,
    Vector,
}

