//! Left-edge pinning for frozen columns.

/// Width every pinned column is assumed to occupy. The theme sizes columns to match.
pub const FIXED_COLUMN_WIDTH_PX: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickyHint {
    Pinned { left_px: usize },
    Free,
}

/// Pins `column_index` when it sits at or before `frozen_index`.
pub fn sticky_offset(column_index: usize, frozen_index: Option<usize>) -> StickyHint {
    match frozen_index {
        Some(frozen) if column_index <= frozen => StickyHint::Pinned {
            left_px: column_index * FIXED_COLUMN_WIDTH_PX,
        },
        _ => StickyHint::Free,
    }
}

impl StickyHint {
    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Pinned { .. })
    }

    /// Inline style for a body cell.
    pub fn cell_style(&self) -> String {
        match self {
            Self::Pinned { left_px } => {
                format!("position: sticky; left: {left_px}px; z-index: 2;")
            }
            Self::Free => String::new(),
        }
    }

    /// Header cells stack above pinned body cells.
    pub fn header_style(&self) -> String {
        match self {
            Self::Pinned { left_px } => {
                format!("position: sticky; left: {left_px}px; z-index: 3;")
            }
            Self::Free => "z-index: 1;".to_string(),
        }
    }
}
