use crate::foundation::core::{Canvas, Slot};

/// Bubble column width as a fraction of panel width.
pub const COLUMN_WIDTH_FRACTION: f64 = 0.42;
/// Edge padding as a fraction of panel width (applied on both axes).
pub const PADDING_FRACTION: f64 = 0.035;
/// Vertical space reserved per slot, in line heights.
pub const RESERVED_LINES: f64 = 4.0;

/// Panel corner a bubble slot is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Fixed priority order turns cycle through.
    pub const ROTATION: [Corner; 4] = [
        Corner::TopRight,
        Corner::TopLeft,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn for_turn(turn_index: usize) -> Self {
        Self::ROTATION[turn_index % Self::ROTATION.len()]
    }
}

/// Four fixed bubble slots for one panel size.
///
/// Turn `i` always lands in `slots[i % 4]`. The allocator does not look at how much height a
/// previous bubble actually used, so dialogue that wraps past [`RESERVED_LINES`] may overlap the
/// next bubble in the same slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotAllocator {
    slots: [Slot; 4],
}

impl SlotAllocator {
    pub fn new(panel: Canvas, line_height_px: f32) -> Self {
        let w = f64::from(panel.width);
        let h = f64::from(panel.height);
        let pad = w * PADDING_FRACTION;
        let col_w = w * COLUMN_WIDTH_FRACTION;
        let reserved_h = f64::from(line_height_px.max(0.0)) * RESERVED_LINES;

        let left = pad;
        let right = (w - pad - col_w).max(0.0);
        let top = pad;
        let bottom = (h - pad - reserved_h).max(0.0);

        let slot_at = |corner: Corner| match corner {
            Corner::TopRight => Slot::new(right, top, col_w, reserved_h),
            Corner::TopLeft => Slot::new(left, top, col_w, reserved_h),
            Corner::BottomLeft => Slot::new(left, bottom, col_w, reserved_h),
            Corner::BottomRight => Slot::new(right, bottom, col_w, reserved_h),
        };

        Self {
            slots: Corner::ROTATION.map(slot_at),
        }
    }

    /// Slots in rotation order.
    pub fn slots(&self) -> &[Slot; 4] {
        &self.slots
    }

    pub fn allocate(&self, turn_index: usize) -> Slot {
        self.slots[turn_index % self.slots.len()]
    }
}

/// Slot for dialogue turn `turn_index` on a panel of the given size.
pub fn allocate(panel: Canvas, line_height_px: f32, turn_index: usize) -> Slot {
    SlotAllocator::new(panel, line_height_px).allocate(turn_index)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/slots.rs"]
mod tests;
