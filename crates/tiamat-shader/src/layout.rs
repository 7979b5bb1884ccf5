use std::fmt;
use std::sync::Arc;

use crate::error::LayoutError;
use crate::var::Attribute;

// ── VertexLayout ──────────────────────────────────────────────────────────

/// Byte layout of one vertex record.
///
/// Walks the attribute list in order with a running cursor: an attribute
/// with an explicit offset moves the cursor there verbatim, otherwise the
/// cursor is rounded up to the attribute's alignment (its scalar kind's
/// byte width). The total stride is the final cursor rounded up to the
/// maximum alignment, unless an explicit stride was supplied, which wins
/// unconditionally.
///
/// The plain constructors do not police explicit offsets; interleaving
/// pre-placed and auto-placed attributes can produce overlapping ranges if
/// misused (a debug message is logged when the cursor moves backwards).
/// Use [`VertexLayout::validated`] to reject such layouts instead.
#[derive(Debug)]
pub struct VertexLayout {
    attributes: Vec<Arc<Attribute>>,
    alignments: Vec<u32>,
    offsets: Vec<u32>,
    max_alignment: u32,
    total_size: u32,
}

/// `value` rounded up to the next multiple of `align` (`align >= 1`).
fn next_aligned(value: u32, align: u32) -> u32 {
    value.div_ceil(align) * align
}

impl VertexLayout {
    pub fn new(attributes: Vec<Arc<Attribute>>) -> Self {
        Self::build(attributes, None)
    }

    /// A layout whose total stride is forced to `total_size`, bypassing the
    /// computed value. No cross-check against the computed minimum happens
    /// here.
    pub fn with_size(attributes: Vec<Arc<Attribute>>, total_size: u32) -> Self {
        Self::build(attributes, Some(total_size))
    }

    /// Like [`VertexLayout::with_size`] (or [`VertexLayout::new`] when
    /// `total_size` is `None`), but rejects overlapping attribute ranges
    /// and an explicit stride below the computed minimum.
    pub fn validated(
        attributes: Vec<Arc<Attribute>>,
        total_size: Option<u32>,
    ) -> Result<Self, LayoutError> {
        let layout = Self::build(attributes, total_size);

        let mut placed: Vec<(usize, u32, u32)> = Vec::new(); // (index, start, end)
        for (i, attr) in layout.attributes.iter().enumerate() {
            let start = layout.offsets[i];
            let end = start + attr.ty().bytes_size();
            if let Some(&(j, _, _)) = placed
                .iter()
                .find(|&&(_, s, e)| start < e && s < end)
            {
                return Err(LayoutError::Overlap {
                    first: layout.attributes[j].name().to_owned(),
                    second: attr.name().to_owned(),
                    offset: start,
                });
            }
            placed.push((i, start, end));
        }

        if let Some(given) = total_size {
            let required = layout
                .offsets
                .iter()
                .zip(&layout.attributes)
                .map(|(off, attr)| off + attr.ty().bytes_size())
                .max()
                .unwrap_or(0);
            if given < required {
                return Err(LayoutError::StrideTooSmall { given, required });
            }
        }

        Ok(layout)
    }

    fn build(attributes: Vec<Arc<Attribute>>, explicit_size: Option<u32>) -> Self {
        let alignments: Vec<u32> = attributes
            .iter()
            .map(|attr| attr.ty().kind().bytes_size().max(1))
            .collect();

        let mut cursor = 0u32;
        let mut offsets = Vec::with_capacity(attributes.len());
        for (attr, &align) in attributes.iter().zip(&alignments) {
            match attr.offset() {
                Some(explicit) => {
                    if explicit < cursor {
                        log::debug!(
                            "explicit offset {explicit} of attribute {:?} rewinds the cursor from {cursor}; ranges may overlap",
                            attr.name()
                        );
                    }
                    cursor = explicit;
                }
                None => cursor = next_aligned(cursor, align),
            }
            offsets.push(cursor);
            cursor += attr.ty().bytes_size();
        }

        let max_alignment = alignments.iter().copied().max().unwrap_or(1);
        let total_size = explicit_size.unwrap_or_else(|| next_aligned(cursor, max_alignment));

        Self { attributes, alignments, offsets, max_alignment, total_size }
    }

    pub fn attributes(&self) -> &[Arc<Attribute>] {
        &self.attributes
    }

    /// Per-attribute alignment: the scalar kind's byte width, minimum 1.
    pub fn alignments(&self) -> &[u32] {
        &self.alignments
    }

    /// Per-attribute absolute byte offsets, parallel to [`attributes`](Self::attributes).
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn max_alignment(&self) -> u32 {
        self.max_alignment
    }

    /// Total byte size of one vertex record.
    pub fn total_size(&self) -> u32 {
        self.total_size
    }
}

impl fmt::Display for VertexLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.attributes.iter().map(|a| a.name()).collect();
        write!(f, "VertexLayout[{}]", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VarType;

    // ── auto placement ────────────────────────────────────────────────────

    #[test]
    fn packs_with_natural_alignment() {
        // sizes [12 (align 4), 2 (align 2), 1 (align 1)]
        let layout = VertexLayout::new(vec![
            Attribute::new("a_pos", VarType::Float3, false),
            Attribute::new("a_uv", VarType::UShort1, true),
            Attribute::new("a_flag", VarType::UByte1, false),
        ]);
        assert_eq!(layout.alignments(), [4, 2, 1]);
        assert_eq!(layout.offsets(), [0, 12, 14]);
        assert_eq!(layout.max_alignment(), 4);
        assert_eq!(layout.total_size(), 16);
    }

    #[test]
    fn rounds_cursor_up_before_wider_attribute() {
        // 1-byte attr then a 4-byte-aligned attr: offset jumps 1 -> 4.
        let layout = VertexLayout::new(vec![
            Attribute::new("a_flag", VarType::UByte1, false),
            Attribute::new("a_pos", VarType::Float2, false),
        ]);
        assert_eq!(layout.offsets(), [0, 4]);
        assert_eq!(layout.total_size(), 12);
    }

    #[test]
    fn empty_layout_has_stride_zero() {
        let layout = VertexLayout::new(Vec::new());
        assert_eq!(layout.total_size(), 0);
        assert_eq!(layout.max_alignment(), 1);
    }

    // ── explicit offsets and stride ───────────────────────────────────────

    #[test]
    fn explicit_offset_moves_the_cursor_verbatim() {
        let layout = VertexLayout::new(vec![
            Attribute::new("a_pos", VarType::Float2, false),
            Attribute::with_offset("a_color", VarType::UByte4, true, 16),
            Attribute::new("a_weight", VarType::Float1, false),
        ]);
        // a_color sits at 16 unrounded; a_weight continues from 20.
        assert_eq!(layout.offsets(), [0, 16, 20]);
        assert_eq!(layout.total_size(), 24);
    }

    #[test]
    fn explicit_stride_wins_verbatim() {
        let layout = VertexLayout::with_size(
            vec![Attribute::new("a_pos", VarType::Float3, false)],
            64,
        );
        assert_eq!(layout.total_size(), 64);
        // even when smaller than the computed minimum
        let tight = VertexLayout::with_size(
            vec![Attribute::new("a_pos", VarType::Float3, false)],
            8,
        );
        assert_eq!(tight.total_size(), 8);
    }

    // ── validated ─────────────────────────────────────────────────────────

    #[test]
    fn validated_accepts_clean_layouts() {
        let layout = VertexLayout::validated(
            vec![
                Attribute::new("a_pos", VarType::Float2, false),
                Attribute::new("a_uv", VarType::Float2, false),
            ],
            None,
        )
        .unwrap();
        assert_eq!(layout.offsets(), [0, 8]);
    }

    #[test]
    fn validated_rejects_overlap() {
        let err = VertexLayout::validated(
            vec![
                Attribute::new("a_pos", VarType::Float4, false),
                Attribute::with_offset("a_uv", VarType::Float2, false, 8),
            ],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::Overlap { offset: 8, .. }));
    }

    #[test]
    fn validated_rejects_short_stride() {
        let err = VertexLayout::validated(
            vec![Attribute::new("a_pos", VarType::Float3, false)],
            Some(8),
        )
        .unwrap_err();
        assert_eq!(err, LayoutError::StrideTooSmall { given: 8, required: 12 });
    }

    #[test]
    fn display_lists_attribute_names() {
        let layout = VertexLayout::new(vec![
            Attribute::new("a_pos", VarType::Float2, false),
            Attribute::new("a_uv", VarType::Float2, false),
        ]);
        assert_eq!(format!("{layout}"), "VertexLayout[a_pos, a_uv]");
    }
}
