//! Bracket-tag parsing and interpretation.
//!
//! Device names are free text typed by players, e.g.
//! `"Hangar Door [Airlock] [E] [Bay1]"`.  Tags are the delimited
//! fragments of that text, kept *with* their delimiters so they compare
//! exactly as written.  Parsing is best effort: an unterminated fragment
//! simply yields nothing.
//!
//! Once extracted, every tag is interpreted exactly once into a
//! [`TagKind`]; the rest of the crate works with [`DeviceLabels`]
//! instead of raw strings.

use core::fmt;

use crate::config::AirlockConfig;

/// One delimited tag, delimiters included (`"[Bay1]"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the tags of `name` in the order they appear.
///
/// A start marker always begins a fresh tag, discarding any open
/// fragment.  An end marker outside a tag is plain text.
pub fn parse_tags(name: &str, start: char, end: char) -> Vec<Tag> {
    let mut tags = Vec::new();
    let mut body = String::new();
    let mut inside = false;

    for c in name.chars() {
        if c == start {
            inside = true;
            body.clear();
        } else if c == end {
            if inside {
                let mut tag = String::with_capacity(body.len() + start.len_utf8() + end.len_utf8());
                tag.push(start);
                tag.push_str(&body);
                tag.push(end);
                tags.push(Tag(tag));
                inside = false;
                body.clear();
            }
        } else if inside {
            body.push(c);
        }
    }

    tags
}

/// What a single tag means to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// The participation marker (`[Airlock]`).
    Marker,
    /// Interior door role (`[I]`).
    Interior,
    /// Exterior door role (`[E]`).
    Exterior,
    /// Anything else: a candidate group name.
    Group,
}

/// Door role declared by tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorRole {
    Interior,
    Exterior,
    /// Neither role tag present.
    Unspecified,
}

/// Tag delimiters plus the three reserved tags.
#[derive(Debug, Clone)]
pub struct TagScheme {
    start: char,
    end: char,
    marker: String,
    interior: String,
    exterior: String,
}

impl TagScheme {
    pub fn new(config: &AirlockConfig) -> Self {
        Self {
            start: config.tag_start,
            end: config.tag_end,
            marker: config.marker_tag.clone(),
            interior: config.interior_tag.clone(),
            exterior: config.exterior_tag.clone(),
        }
    }

    /// The participation marker, used as the discovery filter.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn parse(&self, name: &str) -> Vec<Tag> {
        parse_tags(name, self.start, self.end)
    }

    pub fn interpret(&self, tag: &Tag) -> TagKind {
        let t = tag.as_str();
        if t == self.marker {
            TagKind::Marker
        } else if t == self.interior {
            TagKind::Interior
        } else if t == self.exterior {
            TagKind::Exterior
        } else {
            TagKind::Group
        }
    }

    /// Parse and interpret a device name in one pass.
    pub fn labels(&self, name: &str) -> DeviceLabels {
        let tags = self.parse(name);
        let kinds: Vec<TagKind> = tags.iter().map(|t| self.interpret(t)).collect();

        let group = tags
            .iter()
            .zip(&kinds)
            .find(|(_, kind)| **kind == TagKind::Group)
            .map(|(tag, _)| tag.clone());

        // Interior wins when a door carries both role tags.
        let role = if kinds.contains(&TagKind::Interior) {
            DoorRole::Interior
        } else if kinds.contains(&TagKind::Exterior) {
            DoorRole::Exterior
        } else {
            DoorRole::Unspecified
        };

        DeviceLabels { tags, group, role }
    }
}

impl Default for TagScheme {
    fn default() -> Self {
        Self::new(&AirlockConfig::default())
    }
}

/// Everything the controller learns from one device name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceLabels {
    /// All tags, in name order.
    pub tags: Vec<Tag>,
    /// First non-reserved tag, if any.
    pub group: Option<Tag>,
    /// Declared door role.  Meaningless for non-doors.
    pub role: DoorRole,
}

impl DeviceLabels {
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}
