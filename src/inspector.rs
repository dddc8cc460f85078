//! Fixed-width decoders for the bytes under the cursor.

use serde::{Deserialize, Serialize};

use crate::editor::Editor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Endian {
    #[default]
    Big,
    Little,
}

impl Endian {
    pub fn toggle(self) -> Self {
        match self {
            Endian::Big => Endian::Little,
            Endian::Little => Endian::Big,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Endian::Big => "MSB",
            Endian::Little => "LSB",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InspectorKind {
    U8,
    U16,
    U32,
    U64,
    U128,
    Ipv4,
}

impl InspectorKind {
    pub const ALL: [InspectorKind; 6] = [
        InspectorKind::U8,
        InspectorKind::U16,
        InspectorKind::U32,
        InspectorKind::U64,
        InspectorKind::U128,
        InspectorKind::Ipv4,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InspectorKind::U8 => "8 bit",
            InspectorKind::U16 => "16 bit",
            InspectorKind::U32 => "32 bit",
            InspectorKind::U64 => "64 bit",
            InspectorKind::U128 => "128 bit",
            InspectorKind::Ipv4 => "IPv4",
        }
    }

    pub fn width(self) -> usize {
        match self {
            InspectorKind::U8 => 1,
            InspectorKind::U16 => 2,
            InspectorKind::U32 | InspectorKind::Ipv4 => 4,
            InspectorKind::U64 => 8,
            InspectorKind::U128 => 16,
        }
    }

    pub fn enabled_by_default(self) -> bool {
        self != InspectorKind::U128
    }

    /// Decodes the leading bytes of `bytes`, `None` when too few remain.
    pub fn decode(self, bytes: &[u8], endian: Endian) -> Option<String> {
        let width = self.width();
        let bytes = bytes.get(..width)?;
        if self == InspectorKind::Ipv4 {
            return Some(format!("{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3]));
        }
        let value = match endian {
            Endian::Big => bytes.iter().fold(0u128, |acc, &b| (acc << 8) | b as u128),
            Endian::Little => bytes.iter().rev().fold(0u128, |acc, &b| (acc << 8) | b as u128),
        };
        Some(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorRow {
    pub label: &'static str,
    pub value: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Inspector {
    pub endian: Endian,
    enabled: Vec<InspectorKind>,
    rows: Vec<InspectorRow>,
}

impl Inspector {
    pub fn new(endian: Endian, enabled: &[InspectorKind]) -> Self {
        Self {
            endian,
            enabled: InspectorKind::ALL
                .into_iter()
                .filter(|k| enabled.contains(k))
                .collect(),
            rows: Vec::new(),
        }
    }

    pub fn default_kinds() -> Vec<InspectorKind> {
        InspectorKind::ALL
            .into_iter()
            .filter(|k| k.enabled_by_default())
            .collect()
    }

    pub fn enabled(&self) -> &[InspectorKind] {
        &self.enabled
    }

    pub fn rows(&self) -> &[InspectorRow] {
        &self.rows
    }

    pub fn toggle_endian(&mut self) {
        self.endian = self.endian.toggle();
    }

    /// Decodes at the cursor, or over the selected bytes only when a
    /// selection is active.
    pub fn refresh(&mut self, editor: &Editor) {
        let data = editor.data();
        let window = match editor.selection() {
            Some(sel) => data.get(sel.first..=sel.last).unwrap_or_default(),
            None => data.get(editor.position()..).unwrap_or_default(),
        };
        self.rows = self
            .enabled
            .iter()
            .map(|kind| InspectorRow {
                label: kind.label(),
                value: kind.decode(window, self.endian),
            })
            .collect();
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(Endian::Big, &Self::default_kinds())
    }
}
