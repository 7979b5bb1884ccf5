// ── VarKind ───────────────────────────────────────────────────────────────

/// Scalar storage kind of a shader value, with its byte width.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VarKind {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    Float,
}

impl VarKind {
    pub const fn bytes_size(self) -> u32 {
        match self {
            VarKind::Byte | VarKind::UnsignedByte => 1,
            VarKind::Short | VarKind::UnsignedShort => 2,
            VarKind::Int | VarKind::Float => 4,
        }
    }
}

// ── VarType ───────────────────────────────────────────────────────────────

/// Semantic shader value type: storage kind + element count + matrix flag.
///
/// Matrices are square float matrices distinguished by [`VarType::is_matrix`];
/// their element counts are 4/9/16. Indexing a matrix operand selects a
/// column via array access rather than a named-component swizzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VarType {
    /// Sentinel for invalid/placeholder slots. Zero elements, zero size.
    Void,

    Mat2,
    Mat3,
    Mat4,

    TextureUnit,

    Int1,

    Float1,
    Float2,
    Float3,
    Float4,

    Short1,
    Short2,
    Short3,
    Short4,

    Bool1,

    Byte4,

    SByte1,
    SByte2,
    SByte3,
    SByte4,

    UByte1,
    UByte2,
    UByte3,
    UByte4,

    SShort1,
    SShort2,
    SShort3,
    SShort4,

    UShort1,
    UShort2,
    UShort3,
    UShort4,

    SInt1,
    SInt2,
    SInt3,
    SInt4,
}

impl VarType {
    /// (kind, element count, matrix flag) for every type.
    const fn desc(self) -> (VarKind, u32, bool) {
        use VarKind as K;
        use VarType as T;
        match self {
            T::Void => (K::Byte, 0, false),

            T::Mat2 => (K::Float, 4, true),
            T::Mat3 => (K::Float, 9, true),
            T::Mat4 => (K::Float, 16, true),

            T::TextureUnit => (K::Int, 1, false),

            T::Int1 => (K::Int, 1, false),

            T::Float1 => (K::Float, 1, false),
            T::Float2 => (K::Float, 2, false),
            T::Float3 => (K::Float, 3, false),
            T::Float4 => (K::Float, 4, false),

            T::Short1 => (K::Short, 1, false),
            T::Short2 => (K::Short, 2, false),
            T::Short3 => (K::Short, 3, false),
            T::Short4 => (K::Short, 4, false),

            T::Bool1 => (K::UnsignedByte, 1, false),

            T::Byte4 => (K::UnsignedByte, 4, false),

            T::SByte1 => (K::Byte, 1, false),
            T::SByte2 => (K::Byte, 2, false),
            T::SByte3 => (K::Byte, 3, false),
            T::SByte4 => (K::Byte, 4, false),

            T::UByte1 => (K::UnsignedByte, 1, false),
            T::UByte2 => (K::UnsignedByte, 2, false),
            T::UByte3 => (K::UnsignedByte, 3, false),
            T::UByte4 => (K::UnsignedByte, 4, false),

            T::SShort1 => (K::Short, 1, false),
            T::SShort2 => (K::Short, 2, false),
            T::SShort3 => (K::Short, 3, false),
            T::SShort4 => (K::Short, 4, false),

            T::UShort1 => (K::UnsignedShort, 1, false),
            T::UShort2 => (K::UnsignedShort, 2, false),
            T::UShort3 => (K::UnsignedShort, 3, false),
            T::UShort4 => (K::UnsignedShort, 4, false),

            T::SInt1 => (K::Int, 1, false),
            T::SInt2 => (K::Int, 2, false),
            T::SInt3 => (K::Int, 3, false),
            T::SInt4 => (K::Int, 4, false),
        }
    }

    pub const fn kind(self) -> VarKind {
        self.desc().0
    }

    pub const fn element_count(self) -> u32 {
        self.desc().1
    }

    pub const fn is_matrix(self) -> bool {
        self.desc().2
    }

    /// Byte size, determined purely from kind and count. No internal padding.
    pub const fn bytes_size(self) -> u32 {
        self.kind().bytes_size() * self.element_count()
    }

    /// The named type for `kind` with `count` elements.
    ///
    /// Count 0 is [`VarType::Void`]. Panics when `count` is outside `0..=4`
    /// (precondition violation, not a recoverable error).
    pub fn of(kind: VarKind, count: u32) -> VarType {
        match kind {
            VarKind::Byte => Self::byte(count),
            VarKind::UnsignedByte => Self::ubyte(count),
            VarKind::Short => Self::short(count),
            VarKind::UnsignedShort => Self::ushort(count),
            VarKind::Int => Self::int(count),
            VarKind::Float => Self::float(count),
        }
    }

    pub fn byte(count: u32) -> VarType {
        use VarType as T;
        match count {
            0 => T::Void,
            1 => T::SByte1,
            2 => T::SByte2,
            3 => T::SByte3,
            4 => T::SByte4,
            n => panic!("element count {n} out of range 0..=4"),
        }
    }

    pub fn ubyte(count: u32) -> VarType {
        use VarType as T;
        match count {
            0 => T::Void,
            1 => T::UByte1,
            2 => T::UByte2,
            3 => T::UByte3,
            4 => T::UByte4,
            n => panic!("element count {n} out of range 0..=4"),
        }
    }

    pub fn short(count: u32) -> VarType {
        use VarType as T;
        match count {
            0 => T::Void,
            1 => T::SShort1,
            2 => T::SShort2,
            3 => T::SShort3,
            4 => T::SShort4,
            n => panic!("element count {n} out of range 0..=4"),
        }
    }

    pub fn ushort(count: u32) -> VarType {
        use VarType as T;
        match count {
            0 => T::Void,
            1 => T::UShort1,
            2 => T::UShort2,
            3 => T::UShort3,
            4 => T::UShort4,
            n => panic!("element count {n} out of range 0..=4"),
        }
    }

    pub fn int(count: u32) -> VarType {
        use VarType as T;
        match count {
            0 => T::Void,
            1 => T::SInt1,
            2 => T::SInt2,
            3 => T::SInt3,
            4 => T::SInt4,
            n => panic!("element count {n} out of range 0..=4"),
        }
    }

    pub fn float(count: u32) -> VarType {
        use VarType as T;
        match count {
            0 => T::Void,
            1 => T::Float1,
            2 => T::Float2,
            3 => T::Float3,
            4 => T::Float4,
            n => panic!("element count {n} out of range 0..=4"),
        }
    }
}

// ── ShaderStage ───────────────────────────────────────────────────────────

/// Which pipeline stage a statement tree belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}
