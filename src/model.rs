use std::fmt;

/// Number of layers a tube holds in the classic game.
pub const DEFAULT_CAPACITY: usize = 4;

/// Opaque color identifier. Colors compare by id only; what they look like is up
/// to the renderer's palette.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct LiquidColor(usize);

impl LiquidColor {
    pub fn new(id: usize) -> Self {
        LiquidColor(id)
    }

    pub fn id(&self) -> usize {
        self.0
    }

    /// Parse a label like "A", "Z", "AA" back into a color.
    /// Uses Excel-style base-26 numbering: A=0, B=1, ..., Z=25, AA=26, AB=27, ...
    pub fn from_label(label: &str) -> Option<Self> {
        let mut acc: usize = 0;
        let mut saw_any = false;

        for ch in label.trim().chars() {
            if !ch.is_ascii_alphabetic() {
                return None;
            }
            let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize;
            acc = acc.checked_mul(26)?.checked_add(digit + 1)?;
            saw_any = true;
        }

        if !saw_any {
            return None;
        }
        acc.checked_sub(1).map(LiquidColor)
    }

    pub fn label(&self) -> String {
        let mut chars = Vec::new();
        let mut id = self.0 + 1;
        while id > 0 {
            let rem = (id - 1) % 26;
            chars.push((b'A' + rem as u8) as char);
            id = (id - 1) / 26;
        }
        chars.iter().rev().collect()
    }
}

impl fmt::Display for LiquidColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A bounded stack of color layers. Index 0 is the bottom, the last element is the
/// pourable top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tube {
    layers: Vec<LiquidColor>,
    capacity: usize,
    cleared: bool,
}

impl Tube {
    pub fn new(capacity: usize) -> Self {
        Self {
            layers: Vec::with_capacity(capacity),
            capacity,
            cleared: false,
        }
    }

    /// Build a tube from bottom-to-top layers. Returns `None` when the layers do
    /// not fit.
    pub fn with_layers(capacity: usize, layers: Vec<LiquidColor>) -> Option<Self> {
        if layers.len() > capacity {
            return None;
        }
        Some(Self {
            layers,
            capacity,
            cleared: false,
        })
    }

    /// Parse a tube from its text representation, bottom first.
    ///
    /// Single-letter labels may be written back to back ("AABC"); as soon as one
    /// label needs several letters the layers are comma separated ("A,AB,C").
    /// An empty string is an empty tube.
    pub fn from_repr(repr: &str, capacity: usize) -> Option<Self> {
        let repr = repr.trim();
        let mut layers = Vec::new();
        if repr.contains(',') {
            for token in repr.split(',') {
                layers.push(LiquidColor::from_label(token)?);
            }
        } else {
            for ch in repr.chars() {
                layers.push(LiquidColor::from_label(&ch.to_string())?);
            }
        }
        Self::with_layers(capacity, layers)
    }

    pub fn layers(&self) -> &[LiquidColor] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.layers.len() >= self.capacity
    }

    pub fn empty_space(&self) -> usize {
        self.capacity.saturating_sub(self.layers.len())
    }

    pub fn top_color(&self) -> Option<LiquidColor> {
        self.layers.last().copied()
    }

    /// Count of consecutive layers at the top sharing the top color.
    pub fn top_run_length(&self) -> usize {
        let Some(top) = self.top_color() else {
            return 0;
        };
        self.layers
            .iter()
            .rev()
            .take_while(|&&color| color == top)
            .count()
    }

    /// Whether a pour of `color` may land on this tube. Capacity is not part of
    /// legality; a full tube simply receives nothing.
    pub fn accepts(&self, color: LiquidColor) -> bool {
        match self.top_color() {
            None => true,
            Some(top) => top == color,
        }
    }

    /// Full, and every layer is the same color.
    pub fn is_sorted(&self) -> bool {
        match self.layers.first() {
            Some(bottom) => self.is_full() && self.layers.iter().all(|c| c == bottom),
            None => false,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Sticky: once set it stays set for this tube instance.
    pub(crate) fn mark_cleared(&mut self) {
        self.cleared = true;
    }

    pub(crate) fn pop_layer(&mut self) -> Option<LiquidColor> {
        self.layers.pop()
    }

    pub(crate) fn push_layer(&mut self, color: LiquidColor) -> bool {
        if self.is_full() {
            return false;
        }
        self.layers.push(color);
        true
    }

    pub fn text_representation(&self) -> String {
        let labels: Vec<String> = self.layers.iter().map(|c| c.label()).collect();
        let has_multi_char = labels.iter().any(|s| s.len() > 1);
        let separator = if has_multi_char { "," } else { "" };
        labels.join(separator)
    }
}

impl fmt::Display for Tube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.text_representation())
    }
}
