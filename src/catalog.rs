//! Static component library.
//!
//! Every node placed on the canvas is an instance of one [`Archetype`]. The
//! set is closed, so a node can never reference an entry that does not exist;
//! the only place an unknown type can show up is the string boundary
//! ([`Archetype::from_type_str`]), where it is reported as
//! [`CanvasError::UnknownArchetype`].
//!
//! # Example
//!
//! ```ignore
//! use workflow_canvas::catalog::{self, Archetype};
//!
//! for (category, entries) in catalog::grouped() {
//!     println!("{}", category);
//!     for spec in entries {
//!         println!("  {} ({}→{})", spec.name, spec.inputs, spec.outputs);
//!     }
//! }
//!
//! let db: Archetype = "database".parse()?;
//! assert_eq!(db.spec().outputs, 1);
//! ```

use crate::error::{CanvasError, Result};
use serde::{Deserialize, Serialize};
use slint::Color;
use std::fmt;
use std::str::FromStr;

/// Library groups, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    DataSources,
    InputComponents,
    ProcessingNodes,
    OutputComponents,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::DataSources,
        Category::InputComponents,
        Category::ProcessingNodes,
        Category::OutputComponents,
    ];

    /// Human readable heading
    pub fn label(self) -> &'static str {
        match self {
            Category::DataSources => "Data Sources",
            Category::InputComponents => "Input Components",
            Category::ProcessingNodes => "Processing Nodes",
            Category::OutputComponents => "Output Components",
        }
    }

    /// Archetypes in this category, in library order
    pub fn archetypes(self) -> impl Iterator<Item = Archetype> {
        Archetype::ALL
            .into_iter()
            .filter(move |a| a.category() == self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reusable node type from the component library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    Database,
    Api,
    FileUpload,
    Csv,
    Camera,
    Microphone,
    TextInput,
    Sensor,
    AiModel,
    Filter,
    Transformer,
    Aggregator,
    Display,
    Notification,
    Action,
    Export,
}

/// Display metadata and slot arity of an [`Archetype`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeSpec {
    pub archetype: Archetype,
    pub name: &'static str,
    pub category: Category,
    pub color: Color,
    pub inputs: usize,
    pub outputs: usize,
}

impl Archetype {
    /// All archetypes in library order
    pub const ALL: [Archetype; 16] = [
        Archetype::Database,
        Archetype::Api,
        Archetype::FileUpload,
        Archetype::Csv,
        Archetype::Camera,
        Archetype::Microphone,
        Archetype::TextInput,
        Archetype::Sensor,
        Archetype::AiModel,
        Archetype::Filter,
        Archetype::Transformer,
        Archetype::Aggregator,
        Archetype::Display,
        Archetype::Notification,
        Archetype::Action,
        Archetype::Export,
    ];

    /// The type string used by drag payloads and serialized workflows
    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Database => "database",
            Archetype::Api => "api",
            Archetype::FileUpload => "file-upload",
            Archetype::Csv => "csv",
            Archetype::Camera => "camera",
            Archetype::Microphone => "microphone",
            Archetype::TextInput => "text-input",
            Archetype::Sensor => "sensor",
            Archetype::AiModel => "ai-model",
            Archetype::Filter => "filter",
            Archetype::Transformer => "transformer",
            Archetype::Aggregator => "aggregator",
            Archetype::Display => "display",
            Archetype::Notification => "notification",
            Archetype::Action => "action",
            Archetype::Export => "export",
        }
    }

    /// Look up an archetype by its type string.
    pub fn from_type_str(s: &str) -> Result<Archetype> {
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| CanvasError::UnknownArchetype(s.to_string()))
    }

    pub fn category(self) -> Category {
        use Archetype::*;
        match self {
            Database | Api | FileUpload | Csv => Category::DataSources,
            Camera | Microphone | TextInput | Sensor => Category::InputComponents,
            AiModel | Filter | Transformer | Aggregator => Category::ProcessingNodes,
            Display | Notification | Action | Export => Category::OutputComponents,
        }
    }

    /// Full catalog entry for this archetype.
    pub fn spec(self) -> ArchetypeSpec {
        let (name, rgb, inputs, outputs) = match self {
            Archetype::Database => ("Database", 0x2563eb, 0, 1),
            Archetype::Api => ("REST API", 0x9333ea, 0, 1),
            Archetype::FileUpload => ("File Upload", 0x16a34a, 0, 1),
            Archetype::Csv => ("CSV Data", 0x059669, 0, 1),
            Archetype::Camera => ("Camera Feed", 0x0d9488, 0, 1),
            Archetype::Microphone => ("Audio Input", 0xdb2777, 0, 1),
            Archetype::TextInput => ("Text Input", 0x4f46e5, 0, 1),
            Archetype::Sensor => ("IoT Sensor", 0xea580c, 0, 1),
            Archetype::AiModel => ("AI Model", 0x0891b2, 1, 1),
            Archetype::Filter => ("Data Filter", 0xd97706, 1, 1),
            Archetype::Transformer => ("Transform", 0x475569, 1, 1),
            Archetype::Aggregator => ("Aggregator", 0x7c3aed, 2, 1),
            Archetype::Display => ("Dashboard", 0xdc2626, 1, 0),
            Archetype::Notification => ("Alert", 0xca8a04, 1, 0),
            Archetype::Action => ("Action", 0xe11d48, 1, 0),
            Archetype::Export => ("Export Data", 0x4b5563, 1, 0),
        };
        ArchetypeSpec {
            archetype: self,
            name,
            category: self.category(),
            color: rgb_color(rgb),
            inputs,
            outputs,
        }
    }

    pub fn inputs(self) -> usize {
        self.spec().inputs
    }

    pub fn outputs(self) -> usize {
        self.spec().outputs
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        Archetype::from_type_str(s)
    }
}

/// The library grouped by category, ready for a sidebar.
pub fn grouped() -> Vec<(Category, Vec<ArchetypeSpec>)> {
    Category::ALL
        .into_iter()
        .map(|c| (c, c.archetypes().map(Archetype::spec).collect()))
        .collect()
}

fn rgb_color(rgb: u32) -> Color {
    Color::from_rgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}
