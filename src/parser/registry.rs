//! The schema registry (C2): a declarative, data-driven description of every
//! A2L keyword this reader understands, plus the scalar attribute types
//! (C1) those keywords' attribute tuples are built from.
//!
//! Every entry below is a `static` literal record, not a function — adding a
//! keyword means adding a table row, never writing a parse function. This is
//! the "explicit, constant registry table populated at program start; no
//! reflection needed" re-architecture spec.md §9 calls for, in place of the
//! source's metaclass-driven class registry.

/// The scalar type a single attribute slot may hold.
///
/// A tagged variant, not a singleton identity compared by pointer — spec.md
/// §9 calls out the source's singleton type tags as a pattern to replace
/// with exactly this kind of sum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    Uint,
    Int,
    Ulong,
    Long,
    Float,
    String,
    Ident,
    Enum(&'static [&'static str]),
    Datatype,
    Datasize,
    Addrtype,
    Byteorder,
    Indexorder,
}

pub const DATATYPE_CHOICES: &[&str] = &[
    "UBYTE", "SBYTE", "UWORD", "SWORD", "ULONG", "SLONG", "A_UINT64", "A_INT64", "FLOAT32_IEEE",
    "FLOAT64_IEEE",
];
pub const DATASIZE_CHOICES: &[&str] = &["BYTE", "WORD", "LONG"];
pub const ADDRTYPE_CHOICES: &[&str] = &["PBYTE", "PWORD", "PLONG", "DIRECT"];
pub const BYTEORDER_CHOICES: &[&str] = &["LITTLE_ENDIAN", "BIG_ENDIAN", "MSB_FIRST", "MSB_LAST"];
pub const INDEXORDER_CHOICES: &[&str] = &["INDEX_INCR", "INDEX_DECR"];

impl AttrKind {
    /// The legal value set for an enumerated kind, or `None` for a scalar
    /// kind with no fixed vocabulary.
    pub fn choices(&self) -> Option<&'static [&'static str]> {
        match self {
            AttrKind::Enum(choices) => Some(choices),
            AttrKind::Datatype => Some(DATATYPE_CHOICES),
            AttrKind::Datasize => Some(DATASIZE_CHOICES),
            AttrKind::Addrtype => Some(ADDRTYPE_CHOICES),
            AttrKind::Byteorder => Some(BYTEORDER_CHOICES),
            AttrKind::Indexorder => Some(INDEXORDER_CHOICES),
            _ => None,
        }
    }

    pub fn is_enum_like(&self) -> bool {
        self.choices().is_some()
    }
}

/// One attribute slot in a keyword's fixed tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrDescriptor {
    pub kind: AttrKind,
    pub field: &'static str,
}

const fn attr(kind: AttrKind, field: &'static str) -> AttrDescriptor {
    AttrDescriptor { kind, field }
}

/// The two tabular-body shapes spec.md §4.1 assigns to the `COMPU_TAB`
/// family. `COMPU_TAB` emits numeric pairs; `COMPU_VTAB` maps a numeric
/// input to a verbal label (the source's own vocabulary distinguishes
/// "TAB_VERB" precisely because the output is text, not a number);
/// `COMPU_VTAB_RANGE` maps an input *range* to a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularShape {
    /// `(float in, float out)`, arity taken from a `Uint` count attribute.
    Pairs { count_field: &'static str },
    /// `(float in, string label)`, arity taken from a `Uint` count attribute.
    LabeledPairs { count_field: &'static str },
    /// `(float min, float max, string label)`, arity from a `Uint` count.
    Triples { count_field: &'static str },
}

/// `ANNOTATION_TEXT` captures a sequence of strings; `A2ML` captures one
/// opaque blob of un-tokenized text. Both are `text_node = true` per
/// spec.md §4.1, distinguished here by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextShape {
    Lines,
    Opaque,
}

/// The registry entry for one keyword: its syntax, in full.
#[derive(Debug, Clone, Copy)]
pub struct KeywordDescriptor {
    pub name: &'static str,
    pub attrs: &'static [AttrDescriptor],
    pub variadic: Option<AttrDescriptor>,
    pub children: &'static [&'static str],
    pub block: bool,
    pub multiple: bool,
    pub optional: bool,
    pub text: Option<TextShape>,
    pub tabular: Option<TabularShape>,
}

const fn kw(name: &'static str) -> KeywordDescriptor {
    KeywordDescriptor {
        name,
        attrs: &[],
        variadic: None,
        children: &[],
        block: true,
        multiple: false,
        optional: true,
        text: None,
        tabular: None,
    }
}

macro_rules! descriptor {
    ($ident:ident, $name:literal $(, attrs: $attrs:expr)? $(, variadic: $variadic:expr)? $(, children: $children:expr)? $(, block: $block:expr)? $(, multiple: $multiple:expr)? $(, optional: $optional:expr)? $(, text: $text:expr)? $(, tabular: $tabular:expr)? $(,)?) => {
        pub static $ident: KeywordDescriptor = KeywordDescriptor {
            name: $name,
            $(attrs: $attrs,)?
            $(variadic: $variadic,)?
            $(children: $children,)?
            $(block: $block,)?
            $(multiple: $multiple,)?
            $(optional: $optional,)?
            $(text: $text,)?
            $(tabular: $tabular,)?
            ..kw($name)
        };
    };
}

// ============================================================================
// File envelope
// ============================================================================

descriptor!(ASAP2_VERSION, "ASAP2_VERSION",
    attrs: &[attr(AttrKind::Uint, "VersionNo"), attr(AttrKind::Uint, "UpgradeNo")],
    block: false, optional: true);

descriptor!(A2ML_VERSION, "A2ML_VERSION",
    attrs: &[attr(AttrKind::Uint, "VersionNo"), attr(AttrKind::Uint, "UpgradeNo")],
    block: false, optional: true);

descriptor!(PROJECT, "PROJECT",
    attrs: &[attr(AttrKind::Ident, "Name"), attr(AttrKind::String, "LongIdentifier")],
    children: &["HEADER", "MODULE"], optional: false);

descriptor!(HEADER, "HEADER",
    attrs: &[attr(AttrKind::String, "Comment")],
    children: &["VERSION", "PROJECT_NO"]);

descriptor!(VERSION, "VERSION",
    attrs: &[attr(AttrKind::String, "VersionIdentifier")], block: false);

descriptor!(PROJECT_NO, "PROJECT_NO",
    attrs: &[attr(AttrKind::Ident, "ProjectNumber")], block: false);

descriptor!(MODULE, "MODULE",
    attrs: &[attr(AttrKind::Ident, "Name"), attr(AttrKind::String, "LongIdentifier")],
    children: &[
        "A2ML", "MOD_PAR", "MOD_COMMON", "IF_DATA", "CHARACTERISTIC", "MEASUREMENT",
        "COMPU_METHOD", "COMPU_TAB", "COMPU_VTAB", "COMPU_VTAB_RANGE", "RECORD_LAYOUT",
        "UNIT", "FUNCTION", "GROUP", "FRAME", "USER_RIGHTS", "VARIANT_CODING", "AXIS_PTS",
    ],
    multiple: true);

descriptor!(MOD_PAR, "MOD_PAR",
    attrs: &[attr(AttrKind::String, "Comment")],
    children: &["MEMORY_SEGMENT", "SYSTEM_CONSTANT", "VERSION"]);

descriptor!(MOD_COMMON, "MOD_COMMON",
    attrs: &[attr(AttrKind::String, "Comment")],
    children: &["BYTE_ORDER", "DATA_SIZE", "ALIGNMENT_BYTE", "ALIGNMENT_WORD", "ALIGNMENT_LONG"]);

descriptor!(IF_DATA, "IF_DATA",
    attrs: &[attr(AttrKind::Ident, "Name")], text: Some(TextShape::Opaque));

// ============================================================================
// Characteristics & measurements
// ============================================================================

const CHARACTERISTIC_TYPE: &[&str] =
    &["ASCII", "CURVE", "MAP", "CUBOID", "CUBE_4", "CUBE_5", "VAL_BLK", "VALUE"];

descriptor!(CHARACTERISTIC, "CHARACTERISTIC",
    attrs: &[
        attr(AttrKind::Ident, "Name"),
        attr(AttrKind::String, "LongIdentifier"),
        attr(AttrKind::Enum(CHARACTERISTIC_TYPE), "Type"),
        attr(AttrKind::Ulong, "Address"),
        attr(AttrKind::Ident, "Deposit"),
        attr(AttrKind::Float, "MaxDiff"),
        attr(AttrKind::Ident, "Conversion"),
        attr(AttrKind::Float, "LowerLimit"),
        attr(AttrKind::Float, "UpperLimit"),
    ],
    children: &[
        "ANNOTATION", "AXIS_DESCR", "BIT_MASK", "BYTE_ORDER", "CALIBRATION_ACCESS",
        "DEPENDENT_CHARACTERISTIC", "DISCRETE", "DISPLAY_IDENTIFIER", "ECU_ADDRESS_EXTENSION",
        "EXTENDED_LIMITS", "FORMAT", "FUNCTION_LIST", "GUARD_RAILS", "MAP_LIST", "MATRIX_DIM",
        "MAX_REFRESH", "NUMBER", "READ_ONLY", "REF_MEMORY_SEGMENT", "STEP_SIZE", "SYMBOL_LINK",
        "VIRTUAL_CHARACTERISTIC",
    ],
    multiple: true);

descriptor!(MEASUREMENT, "MEASUREMENT",
    attrs: &[
        attr(AttrKind::Ident, "Name"),
        attr(AttrKind::String, "LongIdentifier"),
        attr(AttrKind::Datatype, "Datatype"),
        attr(AttrKind::Ident, "Conversion"),
        attr(AttrKind::Uint, "Resolution"),
        attr(AttrKind::Float, "Accuracy"),
        attr(AttrKind::Float, "LowerLimit"),
        attr(AttrKind::Float, "UpperLimit"),
    ],
    children: &[
        "ANNOTATION", "BIT_MASK", "BYTE_ORDER", "DISCRETE", "DISPLAY_IDENTIFIER",
        "ECU_ADDRESS_EXTENSION", "FORMAT", "FUNCTION_LIST", "MATRIX_DIM", "MAX_REFRESH",
        "READ_ONLY", "REF_MEMORY_SEGMENT", "SYMBOL_LINK", "VIRTUAL",
    ],
    multiple: true);

descriptor!(VIRTUAL, "VIRTUAL",
    variadic: Some(attr(AttrKind::Ident, "MeasuringChannel")));

descriptor!(VIRTUAL_CHARACTERISTIC, "VIRTUAL_CHARACTERISTIC",
    attrs: &[attr(AttrKind::String, "Formula")],
    variadic: Some(attr(AttrKind::Ident, "Characteristic")));

descriptor!(DEPENDENT_CHARACTERISTIC, "DEPENDENT_CHARACTERISTIC",
    attrs: &[attr(AttrKind::String, "Formula")],
    variadic: Some(attr(AttrKind::Ident, "Characteristic")));

// ============================================================================
// Conversion methods
// ============================================================================

const COMPU_METHOD_TYPE: &[&str] =
    &["IDENTICAL", "FORM", "LINEAR", "RAT_FUNC", "TAB_INTP", "TAB_NOINTP", "TAB_VERB"];

descriptor!(COMPU_METHOD, "COMPU_METHOD",
    attrs: &[
        attr(AttrKind::Ident, "Name"),
        attr(AttrKind::String, "LongIdentifier"),
        attr(AttrKind::Enum(COMPU_METHOD_TYPE), "ConversionType"),
        attr(AttrKind::String, "Format"),
        attr(AttrKind::String, "Unit"),
    ],
    children: &["COEFFS", "COEFFS_LINEAR", "COMPU_TAB_REF", "FORMULA", "REF_UNIT", "STATUS_STRING_REF"],
    multiple: true);

descriptor!(COEFFS, "COEFFS",
    attrs: &[
        attr(AttrKind::Float, "A"), attr(AttrKind::Float, "B"), attr(AttrKind::Float, "C"),
        attr(AttrKind::Float, "D"), attr(AttrKind::Float, "E"), attr(AttrKind::Float, "F"),
    ],
    block: false);

descriptor!(COEFFS_LINEAR, "COEFFS_LINEAR",
    attrs: &[attr(AttrKind::Float, "A"), attr(AttrKind::Float, "B")], block: false);

descriptor!(FORMULA, "FORMULA",
    attrs: &[attr(AttrKind::String, "Fx")], children: &["FORMULA_INV"]);

descriptor!(FORMULA_INV, "FORMULA_INV",
    attrs: &[attr(AttrKind::String, "Gx")], block: false);

descriptor!(REF_UNIT, "REF_UNIT",
    attrs: &[attr(AttrKind::Ident, "Unit")], block: false);

descriptor!(STATUS_STRING_REF, "STATUS_STRING_REF",
    attrs: &[attr(AttrKind::Ident, "ConversionTable")], block: false);

descriptor!(COMPU_TAB_REF, "COMPU_TAB_REF",
    attrs: &[attr(AttrKind::Ident, "ConversionTable")], block: false);

descriptor!(COMPU_TAB, "COMPU_TAB",
    attrs: &[
        attr(AttrKind::Ident, "Name"),
        attr(AttrKind::String, "LongIdentifier"),
        attr(AttrKind::Enum(&["TAB_INTP", "TAB_NOINTP"]), "ConversionType"),
        attr(AttrKind::Uint, "NumberValuePairs"),
    ],
    children: &["DEFAULT_VALUE", "DEFAULT_VALUE_NUMERIC"],
    tabular: Some(TabularShape::Pairs { count_field: "NumberValuePairs" }));

descriptor!(COMPU_VTAB, "COMPU_VTAB",
    attrs: &[
        attr(AttrKind::Ident, "Name"),
        attr(AttrKind::String, "LongIdentifier"),
        attr(AttrKind::Enum(&["TAB_VERB"]), "ConversionType"),
        attr(AttrKind::Uint, "NumberValuePairs"),
    ],
    children: &["DEFAULT_VALUE"],
    tabular: Some(TabularShape::LabeledPairs { count_field: "NumberValuePairs" }));

descriptor!(COMPU_VTAB_RANGE, "COMPU_VTAB_RANGE",
    attrs: &[
        attr(AttrKind::Ident, "Name"),
        attr(AttrKind::String, "LongIdentifier"),
        attr(AttrKind::Uint, "NumberValueTriples"),
    ],
    children: &["DEFAULT_VALUE"],
    tabular: Some(TabularShape::Triples { count_field: "NumberValueTriples" }));

descriptor!(DEFAULT_VALUE, "DEFAULT_VALUE",
    attrs: &[attr(AttrKind::String, "Display")], block: false);

descriptor!(DEFAULT_VALUE_NUMERIC, "DEFAULT_VALUE_NUMERIC",
    attrs: &[attr(AttrKind::Float, "Display")], block: false);

// ============================================================================
// Record layouts
// ============================================================================

descriptor!(RECORD_LAYOUT, "RECORD_LAYOUT",
    attrs: &[attr(AttrKind::Ident, "Name")],
    children: &[
        "FNC_VALUES", "IDENTIFICATION", "AXIS_PTS_X", "AXIS_PTS_Y", "AXIS_PTS_Z",
        "AXIS_RESCALE_X", "NO_AXIS_PTS_X", "OFFSET_X", "DIST_OP_X", "RESERVED",
        "ALIGNMENT_BYTE", "ALIGNMENT_WORD", "ALIGNMENT_LONG", "ALIGNMENT_FLOAT32_IEEE",
        "ALIGNMENT_FLOAT64_IEEE", "STATIC_RECORD_LAYOUT",
    ],
    multiple: true);

descriptor!(FNC_VALUES, "FNC_VALUES",
    attrs: &[
        attr(AttrKind::Uint, "Position"), attr(AttrKind::Datatype, "Datatype"),
        attr(AttrKind::Indexorder, "IndexMode"), attr(AttrKind::Addrtype, "AddressType"),
    ],
    block: false);

descriptor!(IDENTIFICATION, "IDENTIFICATION",
    attrs: &[attr(AttrKind::Uint, "Position"), attr(AttrKind::Datatype, "Datatype")], block: false);

descriptor!(AXIS_PTS_X, "AXIS_PTS_X",
    attrs: &[
        attr(AttrKind::Uint, "Position"), attr(AttrKind::Datatype, "Datatype"),
        attr(AttrKind::Indexorder, "IndexIncr"), attr(AttrKind::Addrtype, "Addressing"),
    ],
    block: false);
descriptor!(AXIS_PTS_Y, "AXIS_PTS_Y", attrs: &AXIS_PTS_X.attrs, block: false);
descriptor!(AXIS_PTS_Z, "AXIS_PTS_Z", attrs: &AXIS_PTS_X.attrs, block: false);

descriptor!(AXIS_RESCALE_X, "AXIS_RESCALE_X",
    attrs: &[
        attr(AttrKind::Uint, "Position"), attr(AttrKind::Datatype, "Datatype"),
        attr(AttrKind::Uint, "MaxNumberOfRescalePairs"),
        attr(AttrKind::Indexorder, "IndexIncr"), attr(AttrKind::Addrtype, "Addressing"),
    ],
    block: false);

descriptor!(NO_AXIS_PTS_X, "NO_AXIS_PTS_X",
    attrs: &[attr(AttrKind::Uint, "Position"), attr(AttrKind::Datatype, "Datatype")], block: false);

descriptor!(OFFSET_X, "OFFSET_X",
    attrs: &[attr(AttrKind::Uint, "Position"), attr(AttrKind::Datatype, "Datatype")], block: false);

descriptor!(DIST_OP_X, "DIST_OP_X",
    attrs: &[attr(AttrKind::Uint, "Position"), attr(AttrKind::Datatype, "Datatype")], block: false);

descriptor!(RESERVED, "RESERVED",
    attrs: &[attr(AttrKind::Uint, "Position"), attr(AttrKind::Datasize, "DataSize")],
    block: false, multiple: true);

descriptor!(ALIGNMENT_BYTE, "ALIGNMENT_BYTE", attrs: &[attr(AttrKind::Uint, "AlignmentBorder")], block: false);
descriptor!(ALIGNMENT_WORD, "ALIGNMENT_WORD", attrs: &[attr(AttrKind::Uint, "AlignmentBorder")], block: false);
descriptor!(ALIGNMENT_LONG, "ALIGNMENT_LONG", attrs: &[attr(AttrKind::Uint, "AlignmentBorder")], block: false);
descriptor!(ALIGNMENT_FLOAT32_IEEE, "ALIGNMENT_FLOAT32_IEEE", attrs: &[attr(AttrKind::Uint, "AlignmentBorder")], block: false);
descriptor!(ALIGNMENT_FLOAT64_IEEE, "ALIGNMENT_FLOAT64_IEEE", attrs: &[attr(AttrKind::Uint, "AlignmentBorder")], block: false);
descriptor!(STATIC_RECORD_LAYOUT, "STATIC_RECORD_LAYOUT", block: false);

// ============================================================================
// Axes
// ============================================================================

const AXIS_ATTRIBUTE: &[&str] = &["STD_AXIS", "COM_AXIS", "FIX_AXIS", "CURVE_AXIS", "RES_AXIS"];

descriptor!(AXIS_DESCR, "AXIS_DESCR",
    attrs: &[
        attr(AttrKind::Enum(AXIS_ATTRIBUTE), "Attribute"),
        attr(AttrKind::Ident, "InputQuantity"),
        attr(AttrKind::Ident, "Conversion"),
        attr(AttrKind::Uint, "MaxAxisPoints"),
        attr(AttrKind::Float, "LowerLimit"),
        attr(AttrKind::Float, "UpperLimit"),
    ],
    children: &[
        "ANNOTATION", "AXIS_PTS_REF", "BYTE_ORDER", "CURVE_AXIS_REF", "DEPOSIT",
        "EXTENDED_LIMITS", "FIX_AXIS_PAR", "FIX_AXIS_PAR_DIST", "FIX_AXIS_PAR_LIST",
        "FORMAT", "MAX_GRAD", "MONOTONY", "READ_ONLY", "STEP_SIZE",
    ],
    multiple: true);

descriptor!(AXIS_PTS, "AXIS_PTS",
    attrs: &[
        attr(AttrKind::Ident, "Name"),
        attr(AttrKind::String, "LongIdentifier"),
        attr(AttrKind::Ulong, "Address"),
        attr(AttrKind::Ident, "InputQuantity"),
        attr(AttrKind::Ident, "Deposit"),
        attr(AttrKind::Float, "MaxDiff"),
        attr(AttrKind::Ident, "Conversion"),
        attr(AttrKind::Uint, "MaxAxisPoints"),
        attr(AttrKind::Float, "LowerLimit"),
        attr(AttrKind::Float, "UpperLimit"),
    ],
    children: &[
        "ANNOTATION", "BYTE_ORDER", "CALIBRATION_ACCESS", "DEPOSIT", "DISPLAY_IDENTIFIER",
        "ECU_ADDRESS_EXTENSION", "EXTENDED_LIMITS", "FORMAT", "FUNCTION_LIST", "GUARD_RAILS",
        "MONOTONY", "READ_ONLY", "REF_MEMORY_SEGMENT", "STEP_SIZE", "SYMBOL_LINK",
    ],
    multiple: true);

descriptor!(AXIS_PTS_REF, "AXIS_PTS_REF", attrs: &[attr(AttrKind::Ident, "AxisPoints")], block: false);
descriptor!(CURVE_AXIS_REF, "CURVE_AXIS_REF", attrs: &[attr(AttrKind::Ident, "CurveAxis")], block: false);

descriptor!(FIX_AXIS_PAR, "FIX_AXIS_PAR",
    attrs: &[attr(AttrKind::Int, "Offset"), attr(AttrKind::Int, "Shift"), attr(AttrKind::Uint, "Numberapo")],
    block: false);

descriptor!(FIX_AXIS_PAR_DIST, "FIX_AXIS_PAR_DIST",
    attrs: &[attr(AttrKind::Int, "Offset"), attr(AttrKind::Int, "Distance"), attr(AttrKind::Uint, "Numberapo")],
    block: false);

descriptor!(FIX_AXIS_PAR_LIST, "FIX_AXIS_PAR_LIST",
    variadic: Some(attr(AttrKind::Float, "AxisPts_Value")));

descriptor!(MAX_GRAD, "MAX_GRAD", attrs: &[attr(AttrKind::Float, "MaxGradient")], block: false);

descriptor!(MONOTONY, "MONOTONY",
    attrs: &[attr(AttrKind::Enum(&[
        "MON_DECREASE", "MON_INCREASE", "STRICT_DECREASE", "STRICT_INCREASE",
        "MONOTONOUS", "STRICT_MON", "NOT_MON",
    ]), "Monotony")],
    block: false);

descriptor!(DEPOSIT, "DEPOSIT",
    attrs: &[attr(AttrKind::Enum(&["ABSOLUTE", "DIFFERENCE"]), "Mode")], block: false);

// ============================================================================
// Shared characteristic/measurement attribute keywords
// ============================================================================

descriptor!(BIT_MASK, "BIT_MASK", attrs: &[attr(AttrKind::Ulong, "Mask")], block: false);
descriptor!(BYTE_ORDER, "BYTE_ORDER", attrs: &[attr(AttrKind::Byteorder, "ByteOrder")], block: false);
descriptor!(CALIBRATION_ACCESS, "CALIBRATION_ACCESS",
    attrs: &[attr(AttrKind::Enum(&[
        "CALIBRATION", "NO_CALIBRATION", "NOT_IN_MCD_SYSTEM", "OFFLINE_CALIBRATION",
    ]), "Type")],
    block: false);
descriptor!(DISCRETE, "DISCRETE", block: false);
descriptor!(READ_ONLY, "READ_ONLY", block: false);
descriptor!(GUARD_RAILS, "GUARD_RAILS", block: false);
descriptor!(DISPLAY_IDENTIFIER, "DISPLAY_IDENTIFIER", attrs: &[attr(AttrKind::Ident, "DisplayName")], block: false);
descriptor!(ECU_ADDRESS_EXTENSION, "ECU_ADDRESS_EXTENSION", attrs: &[attr(AttrKind::Int, "Extension")], block: false);
descriptor!(EXTENDED_LIMITS, "EXTENDED_LIMITS",
    attrs: &[attr(AttrKind::Float, "LowerLimit"), attr(AttrKind::Float, "UpperLimit")], block: false);
descriptor!(FORMAT, "FORMAT", attrs: &[attr(AttrKind::String, "FormatString")], block: false);
descriptor!(FUNCTION_LIST, "FUNCTION_LIST", variadic: Some(attr(AttrKind::Ident, "Name")));
descriptor!(MAP_LIST, "MAP_LIST", variadic: Some(attr(AttrKind::Ident, "Name")));
descriptor!(MATRIX_DIM, "MATRIX_DIM",
    attrs: &[attr(AttrKind::Uint, "XDim"), attr(AttrKind::Uint, "YDim"), attr(AttrKind::Uint, "ZDim")],
    block: false);
descriptor!(MAX_REFRESH, "MAX_REFRESH",
    attrs: &[attr(AttrKind::Uint, "ScalingUnit"), attr(AttrKind::Ulong, "Rate")], block: false);
descriptor!(NUMBER, "NUMBER", attrs: &[attr(AttrKind::Uint, "Number")], block: false);
descriptor!(REF_MEMORY_SEGMENT, "REF_MEMORY_SEGMENT", attrs: &[attr(AttrKind::Ident, "Name")], block: false);
descriptor!(STEP_SIZE, "STEP_SIZE", attrs: &[attr(AttrKind::Float, "StepSize")], block: false);
descriptor!(SYMBOL_LINK, "SYMBOL_LINK",
    attrs: &[attr(AttrKind::String, "SymbolName"), attr(AttrKind::Long, "Offset")], block: false);

// ============================================================================
// Annotations
// ============================================================================

descriptor!(ANNOTATION, "ANNOTATION",
    children: &["ANNOTATION_LABEL", "ANNOTATION_ORIGIN", "ANNOTATION_TEXT"], multiple: true);
descriptor!(ANNOTATION_LABEL, "ANNOTATION_LABEL", attrs: &[attr(AttrKind::String, "Label")], block: false);
descriptor!(ANNOTATION_ORIGIN, "ANNOTATION_ORIGIN", attrs: &[attr(AttrKind::String, "Origin")], block: false);
descriptor!(ANNOTATION_TEXT, "ANNOTATION_TEXT", text: Some(TextShape::Lines));

descriptor!(A2ML, "A2ML", text: Some(TextShape::Opaque));

// ============================================================================
// Units, memory, groups, functions, frames, rights, variants
// ============================================================================

descriptor!(UNIT, "UNIT",
    attrs: &[
        attr(AttrKind::Ident, "Name"), attr(AttrKind::String, "LongIdentifier"),
        attr(AttrKind::String, "Display"),
        attr(AttrKind::Enum(&["DERIVED", "EXTENDED_SI"]), "Type"),
    ],
    children: &["SI_EXPONENTS", "REF_UNIT", "UNIT_CONVERSION"], multiple: true);

descriptor!(SI_EXPONENTS, "SI_EXPONENTS",
    attrs: &[
        attr(AttrKind::Int, "Length"), attr(AttrKind::Int, "Mass"), attr(AttrKind::Int, "Time"),
        attr(AttrKind::Int, "ElectricCurrent"), attr(AttrKind::Int, "Temperature"),
        attr(AttrKind::Int, "AmountOfSubstance"), attr(AttrKind::Int, "LuminousIntensity"),
    ],
    block: false);

descriptor!(UNIT_CONVERSION, "UNIT_CONVERSION",
    attrs: &[attr(AttrKind::Float, "Gradient"), attr(AttrKind::Float, "Offset")], block: false);

descriptor!(MEMORY_SEGMENT, "MEMORY_SEGMENT",
    attrs: &[
        attr(AttrKind::Ident, "Name"), attr(AttrKind::String, "LongIdentifier"),
        attr(AttrKind::Ident, "PrgType"), attr(AttrKind::Ident, "MemoryType"),
        attr(AttrKind::Ident, "Attribute"), attr(AttrKind::Ulong, "Address"),
        attr(AttrKind::Ulong, "Size"),
    ],
    variadic: Some(attr(AttrKind::Long, "Offset")),
    children: &["IF_DATA"], multiple: true);

descriptor!(SYSTEM_CONSTANT, "SYSTEM_CONSTANT",
    attrs: &[attr(AttrKind::String, "Name"), attr(AttrKind::String, "Value")], block: false, multiple: true);

descriptor!(DATA_SIZE, "DATA_SIZE", attrs: &[attr(AttrKind::Uint, "Size")], block: false);

descriptor!(GROUP, "GROUP",
    attrs: &[attr(AttrKind::Ident, "GroupName"), attr(AttrKind::String, "GroupLongIdentifier")],
    children: &["ANNOTATION", "REF_CHARACTERISTIC", "REF_MEASUREMENT", "ROOT", "SUB_GROUP", "FUNCTION_LIST"],
    multiple: true);
descriptor!(SUB_GROUP, "SUB_GROUP", variadic: Some(attr(AttrKind::Ident, "Identifier")));
descriptor!(ROOT, "ROOT", block: false);
descriptor!(REF_CHARACTERISTIC, "REF_CHARACTERISTIC", variadic: Some(attr(AttrKind::Ident, "Identifier")));
descriptor!(REF_MEASUREMENT, "REF_MEASUREMENT", variadic: Some(attr(AttrKind::Ident, "Identifier")));

descriptor!(FUNCTION, "FUNCTION",
    attrs: &[attr(AttrKind::Ident, "Name"), attr(AttrKind::String, "LongIdentifier")],
    children: &[
        "ANNOTATION", "DEF_CHARACTERISTIC", "REF_CHARACTERISTIC", "IN_MEASUREMENT",
        "OUT_MEASUREMENT", "LOC_MEASUREMENT", "SUB_FUNCTION", "FUNCTION_VERSION",
    ],
    multiple: true);
descriptor!(DEF_CHARACTERISTIC, "DEF_CHARACTERISTIC", variadic: Some(attr(AttrKind::Ident, "Identifier")));
descriptor!(IN_MEASUREMENT, "IN_MEASUREMENT", variadic: Some(attr(AttrKind::Ident, "Identifier")));
descriptor!(OUT_MEASUREMENT, "OUT_MEASUREMENT", variadic: Some(attr(AttrKind::Ident, "Identifier")));
descriptor!(LOC_MEASUREMENT, "LOC_MEASUREMENT", variadic: Some(attr(AttrKind::Ident, "Identifier")));
descriptor!(SUB_FUNCTION, "SUB_FUNCTION", variadic: Some(attr(AttrKind::Ident, "Identifier")));
descriptor!(FUNCTION_VERSION, "FUNCTION_VERSION", attrs: &[attr(AttrKind::String, "VersionIdentifier")], block: false);

descriptor!(FRAME, "FRAME",
    attrs: &[
        attr(AttrKind::Ident, "Name"), attr(AttrKind::String, "LongIdentifier"),
        attr(AttrKind::Uint, "ScalingUnit"), attr(AttrKind::Ulong, "Rate"),
    ],
    children: &["FRAME_MEASUREMENT"], multiple: true);
descriptor!(FRAME_MEASUREMENT, "FRAME_MEASUREMENT", variadic: Some(attr(AttrKind::Ident, "Identifier")));

descriptor!(USER_RIGHTS, "USER_RIGHTS",
    attrs: &[attr(AttrKind::Ident, "UserLevelId")],
    children: &["READ_ONLY", "REF_GROUP"], multiple: true);
descriptor!(REF_GROUP, "REF_GROUP", variadic: Some(attr(AttrKind::Ident, "Identifier")));

descriptor!(VARIANT_CODING, "VARIANT_CODING",
    children: &["VAR_SEPARATOR", "VAR_NAMING", "VAR_CRITERION", "VAR_FORBIDDEN_COMB", "VAR_CHARACTERISTIC"]);
descriptor!(VAR_SEPARATOR, "VAR_SEPARATOR", attrs: &[attr(AttrKind::String, "Separator")], block: false);
descriptor!(VAR_NAMING, "VAR_NAMING", attrs: &[attr(AttrKind::Enum(&["NUMERIC", "ALPHA"]), "Tag")], block: false);
descriptor!(VAR_CRITERION, "VAR_CRITERION",
    attrs: &[attr(AttrKind::Ident, "Name"), attr(AttrKind::String, "LongIdentifier")],
    variadic: Some(attr(AttrKind::Ident, "Value")),
    children: &["VAR_MEASUREMENT", "VAR_SELECTION_CHARACTERISTIC"], multiple: true);
descriptor!(VAR_MEASUREMENT, "VAR_MEASUREMENT", attrs: &[attr(AttrKind::Ident, "Name")], block: false);
descriptor!(VAR_SELECTION_CHARACTERISTIC, "VAR_SELECTION_CHARACTERISTIC", attrs: &[attr(AttrKind::Ident, "Name")], block: false);
descriptor!(VAR_FORBIDDEN_COMB, "VAR_FORBIDDEN_COMB",
    variadic: Some(attr(AttrKind::Ident, "CriterionValuePair")), multiple: true);
descriptor!(VAR_CHARACTERISTIC, "VAR_CHARACTERISTIC",
    attrs: &[attr(AttrKind::Ident, "Name")],
    variadic: Some(attr(AttrKind::Ident, "Criterion")), multiple: true);

/// The total lookup function C2 requires: every block or inline keyword the
/// parser encounters either has an entry here, or the parser reports
/// `UnknownKeyword` (spec.md §7, §8 "registry totality").
pub fn lookup(name: &str) -> Option<&'static KeywordDescriptor> {
    macro_rules! table {
        ($($ident:ident),* $(,)?) => {
            match name {
                $(stringify!($ident) => Some(&$ident),)*
                _ => None,
            }
        };
    }
    table!(
        ASAP2_VERSION, A2ML_VERSION, PROJECT, HEADER, VERSION, PROJECT_NO, MODULE, MOD_PAR,
        MOD_COMMON, IF_DATA, CHARACTERISTIC, MEASUREMENT, VIRTUAL, VIRTUAL_CHARACTERISTIC,
        DEPENDENT_CHARACTERISTIC, COMPU_METHOD, COEFFS, COEFFS_LINEAR, FORMULA, FORMULA_INV,
        REF_UNIT, STATUS_STRING_REF, COMPU_TAB_REF, COMPU_TAB, COMPU_VTAB, COMPU_VTAB_RANGE,
        DEFAULT_VALUE, DEFAULT_VALUE_NUMERIC, RECORD_LAYOUT, FNC_VALUES, IDENTIFICATION,
        AXIS_PTS_X, AXIS_PTS_Y, AXIS_PTS_Z, AXIS_RESCALE_X, NO_AXIS_PTS_X, OFFSET_X, DIST_OP_X,
        RESERVED, ALIGNMENT_BYTE, ALIGNMENT_WORD, ALIGNMENT_LONG, ALIGNMENT_FLOAT32_IEEE,
        ALIGNMENT_FLOAT64_IEEE, STATIC_RECORD_LAYOUT, AXIS_DESCR, AXIS_PTS, AXIS_PTS_REF,
        CURVE_AXIS_REF, FIX_AXIS_PAR, FIX_AXIS_PAR_DIST, FIX_AXIS_PAR_LIST, MAX_GRAD, MONOTONY,
        DEPOSIT, BIT_MASK, BYTE_ORDER, CALIBRATION_ACCESS, DISCRETE, READ_ONLY, GUARD_RAILS,
        DISPLAY_IDENTIFIER, ECU_ADDRESS_EXTENSION, EXTENDED_LIMITS, FORMAT, FUNCTION_LIST,
        MAP_LIST, MATRIX_DIM, MAX_REFRESH, NUMBER, REF_MEMORY_SEGMENT, STEP_SIZE, SYMBOL_LINK,
        ANNOTATION, ANNOTATION_LABEL, ANNOTATION_ORIGIN, ANNOTATION_TEXT, A2ML, UNIT,
        SI_EXPONENTS, UNIT_CONVERSION, MEMORY_SEGMENT, SYSTEM_CONSTANT, DATA_SIZE, GROUP,
        SUB_GROUP, ROOT, REF_CHARACTERISTIC, REF_MEASUREMENT, FUNCTION, DEF_CHARACTERISTIC,
        IN_MEASUREMENT, OUT_MEASUREMENT, LOC_MEASUREMENT, SUB_FUNCTION, FUNCTION_VERSION,
        FRAME, FRAME_MEASUREMENT, USER_RIGHTS, REF_GROUP, VARIANT_CODING, VAR_SEPARATOR,
        VAR_NAMING, VAR_CRITERION, VAR_MEASUREMENT, VAR_SELECTION_CHARACTERISTIC,
        VAR_FORBIDDEN_COMB, VAR_CHARACTERISTIC,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_total_over_its_vocabulary() {
        assert!(lookup("PROJECT").is_some());
        assert!(lookup("CHARACTERISTIC").is_some());
        assert!(lookup("NOT_A_KEYWORD").is_none());
    }

    #[test]
    fn at_most_one_trailing_variadic() {
        // Spot check: a handful of descriptors with variadics have them
        // declared, and their fixed attrs don't also claim the same field.
        assert!(FIX_AXIS_PAR_LIST.variadic.is_some());
        assert!(FIX_AXIS_PAR_LIST.attrs.is_empty());
    }

    #[test]
    fn characteristic_type_choices_match_spec_scenario_3() {
        let descriptor = lookup("CHARACTERISTIC").unwrap();
        let type_attr = descriptor.attrs.iter().find(|a| a.field == "Type").unwrap();
        assert_eq!(type_attr.kind.choices(), Some(CHARACTERISTIC_TYPE));
    }

    #[test]
    fn text_node_keywords_have_no_attrs_or_children() {
        for name in ["ANNOTATION_TEXT", "A2ML"] {
            let d = lookup(name).unwrap();
            assert!(d.text.is_some());
            assert!(d.attrs.is_empty());
            assert!(d.children.is_empty());
        }
    }

    #[test]
    fn flag_keywords_carry_no_payload() {
        for name in ["READ_ONLY", "GUARD_RAILS", "DISCRETE", "STATIC_RECORD_LAYOUT"] {
            let d = lookup(name).unwrap();
            assert!(d.attrs.is_empty());
            assert!(d.children.is_empty());
            assert!(d.variadic.is_none());
        }
    }
}
