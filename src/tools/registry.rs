use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AnnotationError, AnnotationResult};

use super::{RenderStrategy, ToolId};

/// Static description of one tool.
///
/// `required_points` is 1 or 2 for drawing tools and 0 for navigation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub id: ToolId,
    pub required_points: u8,
    pub shortcut: Option<char>,
    pub strategy: RenderStrategy,
    /// Both points must have different times (the strategy interpolates or
    /// spans along the time axis).
    pub requires_distinct_times: bool,
}

impl ToolDescriptor {
    #[must_use]
    pub const fn new(id: ToolId, required_points: u8, strategy: RenderStrategy) -> Self {
        Self {
            id,
            required_points,
            shortcut: None,
            strategy,
            requires_distinct_times: false,
        }
    }

    #[must_use]
    pub const fn with_shortcut(mut self, key: char) -> Self {
        self.shortcut = Some(key);
        self
    }

    #[must_use]
    pub const fn with_distinct_times(mut self) -> Self {
        self.requires_distinct_times = true;
        self
    }

    fn validate(self) -> AnnotationResult<Self> {
        let expected = match self.strategy {
            RenderStrategy::None => 0,
            RenderStrategy::PriceLine | RenderStrategy::TextLabel => 1,
            RenderStrategy::Segment
            | RenderStrategy::ExtendedSegment
            | RenderStrategy::Box
            | RenderStrategy::FibonacciLevels
            | RenderStrategy::PriceRange => 2,
        };
        if self.id.is_drawing() == (self.strategy == RenderStrategy::None) {
            return Err(AnnotationError::InvalidData(format!(
                "tool `{}` has strategy {:?} which does not match its mode",
                self.id, self.strategy
            )));
        }
        if self.required_points != expected {
            return Err(AnnotationError::InvalidData(format!(
                "tool `{}` requires {} points but strategy {:?} needs {expected}",
                self.id, self.required_points, self.strategy
            )));
        }
        if let Some(key) = self.shortcut {
            if key.is_whitespace() || key.is_control() {
                return Err(AnnotationError::InvalidData(format!(
                    "tool `{}` shortcut must be a printable character",
                    self.id
                )));
            }
        }
        Ok(self)
    }
}

/// Descriptors for every built-in tool with their default shortcuts.
#[must_use]
pub fn standard_tool_descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(ToolId::Cursor, 0, RenderStrategy::None),
        ToolDescriptor::new(ToolId::Crosshair, 0, RenderStrategy::None).with_shortcut('c'),
        ToolDescriptor::new(ToolId::HorizontalLine, 1, RenderStrategy::PriceLine)
            .with_shortcut('h'),
        ToolDescriptor::new(ToolId::TrendLine, 2, RenderStrategy::Segment)
            .with_shortcut('t')
            .with_distinct_times(),
        ToolDescriptor::new(ToolId::Ray, 2, RenderStrategy::ExtendedSegment)
            .with_shortcut('r')
            .with_distinct_times(),
        ToolDescriptor::new(ToolId::Rectangle, 2, RenderStrategy::Box)
            .with_shortcut('b')
            .with_distinct_times(),
        ToolDescriptor::new(ToolId::FibonacciRetracement, 2, RenderStrategy::FibonacciLevels)
            .with_shortcut('f')
            .with_distinct_times(),
        ToolDescriptor::new(ToolId::PriceRange, 2, RenderStrategy::PriceRange).with_shortcut('p'),
        ToolDescriptor::new(ToolId::Text, 1, RenderStrategy::TextLabel).with_shortcut('n'),
    ]
}

/// Immutable lookup tables built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRegistry {
    descriptors: IndexMap<ToolId, ToolDescriptor>,
    shortcuts: IndexMap<char, ToolId>,
}

impl ToolRegistry {
    /// Builds a registry, refusing duplicate tools or shortcut bindings.
    ///
    /// Shortcuts are case-insensitive, so `'F'` and `'f'` collide.
    pub fn new(descriptors: impl IntoIterator<Item = ToolDescriptor>) -> AnnotationResult<Self> {
        let mut by_id = IndexMap::new();
        let mut shortcuts = IndexMap::new();

        for descriptor in descriptors {
            let descriptor = descriptor.validate()?;
            if by_id.contains_key(&descriptor.id) {
                return Err(AnnotationError::InvalidData(format!(
                    "tool `{}` is registered twice",
                    descriptor.id
                )));
            }
            if let Some(key) = descriptor.shortcut.map(normalize_shortcut) {
                if let Some(&first) = shortcuts.get(&key) {
                    return Err(AnnotationError::DuplicateShortcut {
                        key,
                        first,
                        second: descriptor.id,
                    });
                }
                shortcuts.insert(key, descriptor.id);
            }
            by_id.insert(descriptor.id, descriptor);
        }

        if !by_id.contains_key(&ToolId::Cursor) {
            return Err(AnnotationError::InvalidData(
                "tool registry must contain the cursor mode".to_owned(),
            ));
        }

        Ok(Self {
            descriptors: by_id,
            shortcuts,
        })
    }

    pub fn standard() -> AnnotationResult<Self> {
        Self::new(standard_tool_descriptors())
    }

    #[must_use]
    pub fn by_id(&self, id: ToolId) -> Option<&ToolDescriptor> {
        self.descriptors.get(&id)
    }

    pub fn descriptor(&self, id: ToolId) -> AnnotationResult<&ToolDescriptor> {
        self.by_id(id)
            .ok_or(AnnotationError::MissingToolDescriptor(id))
    }

    #[must_use]
    pub fn by_shortcut(&self, key: char) -> Option<ToolId> {
        self.shortcuts.get(&normalize_shortcut(key)).copied()
    }

    #[must_use]
    pub fn contains(&self, id: ToolId) -> bool {
        self.descriptors.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.descriptors.values()
    }
}

fn normalize_shortcut(key: char) -> char {
    let mut lower = key.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => key,
    }
}
