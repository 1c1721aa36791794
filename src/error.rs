//! Error types for map loading.
//!
//! Every variant of `MapError` is fatal: the pipeline aborts and no partial
//! board is returned. Dropped residents are not errors; they are logged and
//! counted in an `AssignmentReport` instead.

/// Errors raised while interpreting a single path `d` attribute.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("unknown SVG path command '{0}'")]
    UnknownCommand(char),

    #[error("ran out of arguments for path command '{command}': expected {expected}, found {found}")]
    MissingArguments {
        command: char,
        expected: usize,
        found: usize,
    },

    #[error("path command '{0}' must not be followed by coordinates")]
    ArgumentsAfterClose(char),

    #[error("invalid path coordinate: '{0}'")]
    InvalidCoordinate(String),

    #[error("path data starts with coordinates before any command: '{0}'")]
    MissingCommand(String),
}

/// Errors that abort loading a map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to read map document: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed SVG document: {0}")]
    Xml(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("required layer '{0}' not found in document")]
    MissingLayer(String),

    #[error("province path data not found in layer '{0}'")]
    MissingPathData(String),

    #[error("in path '{path}': {source}")]
    Path {
        path: String,
        #[source]
        source: PathError,
    },

    #[error("unsupported transform '{0}' (only translate is allowed)")]
    UnsupportedTransform(String),

    #[error("province boundary in layer '{layer}' has {distinct} distinct points, need at least 3")]
    DegenerateBoundary { layer: String, distinct: usize },

    #[error("province #{0} has no name after label assignment")]
    UnnamedProvince(u32),

    #[error("duplicate province name '{0}'")]
    DuplicateProvince(String),

    #[error("province already has name: '{existing}' (tried to assign '{new}')")]
    DuplicateName { existing: String, new: String },

    #[error("{0} already has a supply center")]
    DuplicateSupplyCenter(String),

    #[error("{0} already has a unit")]
    DuplicateOccupant(String),

    #[error("unknown province '{0}'")]
    UnknownProvince(String),

    #[error("province '{province}' has no coast '{suffix}'")]
    UnknownCoast { province: String, suffix: String },

    #[error("coast '{coast}' lists '{adjacent}', which is not adjacent to its province")]
    CoastNotAdjacent { coast: String, adjacent: String },

    #[error("color '{0}' does not belong to any player")]
    UnknownColor(String),

    #[error("unit glyph path with {0} tokens is neither an army nor a fleet")]
    UnknownUnitGlyph(usize),

    #[error("unit in '{0}' has no owning player")]
    UnownedUnit(String),

    #[error("element in layer '{0}' is missing its label")]
    MissingLabel(String),

    #[error("map invariant violated: {0}")]
    InvariantViolation(String),
}

impl MapError {
    /// Wraps a path interpretation failure together with the offending data.
    pub fn path(d: &str, source: PathError) -> Self {
        MapError::Path {
            path: truncate(d, 48),
            source,
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
