//! Change type flags recorded on each changeset entry
//!
//! A source change carries a set of flags (an edit can also be a rename, a
//! merge can also be an add, ...). [`ChangeFlags`] stores them as a bitmask
//! and never relies on set iteration order when reporting: diagnostics use
//! [`UNHANDLED_REPORT_ORDER`].

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::Error;

/// A single change type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeFlag {
    Add,
    Edit,
    Delete,
    Rename,
    SourceRename,
    Branch,
    Merge,
    Lock,
    Property,
    Encoding,
    Rollback,
    Undelete,
    None,
}

/// Order in which flags are listed when a change cannot be replayed.
pub const UNHANDLED_REPORT_ORDER: [ChangeFlag; 10] = [
    ChangeFlag::Branch,
    ChangeFlag::Encoding,
    ChangeFlag::Lock,
    ChangeFlag::Merge,
    ChangeFlag::None,
    ChangeFlag::Property,
    ChangeFlag::Rename,
    ChangeFlag::Rollback,
    ChangeFlag::SourceRename,
    ChangeFlag::Undelete,
];

impl ChangeFlag {
    /// Every flag, in declaration order.
    pub const ALL: [ChangeFlag; 13] = [
        ChangeFlag::Add,
        ChangeFlag::Edit,
        ChangeFlag::Delete,
        ChangeFlag::Rename,
        ChangeFlag::SourceRename,
        ChangeFlag::Branch,
        ChangeFlag::Merge,
        ChangeFlag::Lock,
        ChangeFlag::Property,
        ChangeFlag::Encoding,
        ChangeFlag::Rollback,
        ChangeFlag::Undelete,
        ChangeFlag::None,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Name as written in changeset manifests.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
            Self::Rename => "Rename",
            Self::SourceRename => "SourceRename",
            Self::Branch => "Branch",
            Self::Merge => "Merge",
            Self::Lock => "Lock",
            Self::Property => "Property",
            Self::Encoding => "Encoding",
            Self::Rollback => "Rollback",
            Self::Undelete => "Undelete",
            Self::None => "None",
        }
    }

    /// Upper-case label used in operator diagnostics.
    pub fn label(self) -> String {
        self.name().to_uppercase()
    }
}

impl fmt::Display for ChangeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChangeFlag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|flag| flag.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownChangeFlag {
                name: wanted.to_string(),
            })
    }
}

/// A set of [`ChangeFlag`]s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChangeFlags(u16);

impl ChangeFlags {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, flag: ChangeFlag) {
        self.0 |= flag.bit();
    }

    pub fn contains(self, flag: ChangeFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when at least one of Add, Edit or Delete is set.
    ///
    /// Only such changes are considered for replay.
    pub fn has_content_change(self) -> bool {
        self.contains(ChangeFlag::Add)
            || self.contains(ChangeFlag::Edit)
            || self.contains(ChangeFlag::Delete)
    }

    /// Flags in declaration order.
    pub fn iter(self) -> impl Iterator<Item = ChangeFlag> {
        ChangeFlag::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// Space-separated labels of the flags that have no replay action, in
    /// [`UNHANDLED_REPORT_ORDER`].
    pub fn unhandled_labels(self) -> String {
        UNHANDLED_REPORT_ORDER
            .into_iter()
            .filter(|f| self.contains(*f))
            .map(ChangeFlag::label)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<ChangeFlag> for ChangeFlags {
    fn from(flag: ChangeFlag) -> Self {
        Self(flag.bit())
    }
}

impl FromIterator<ChangeFlag> for ChangeFlags {
    fn from_iter<I: IntoIterator<Item = ChangeFlag>>(iter: I) -> Self {
        let mut flags = Self::empty();
        for flag in iter {
            flags.insert(flag);
        }
        flags
    }
}

impl BitOr for ChangeFlag {
    type Output = ChangeFlags;

    fn bitor(self, rhs: Self) -> ChangeFlags {
        ChangeFlags(self.bit() | rhs.bit())
    }
}

impl BitOr<ChangeFlag> for ChangeFlags {
    type Output = ChangeFlags;

    fn bitor(self, rhs: ChangeFlag) -> ChangeFlags {
        ChangeFlags(self.0 | rhs.bit())
    }
}

impl BitOrAssign<ChangeFlag> for ChangeFlags {
    fn bitor_assign(&mut self, rhs: ChangeFlag) {
        self.insert(rhs);
    }
}

impl fmt::Debug for ChangeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for ChangeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(ChangeFlag::name).collect();
        f.write_str(&names.join(", "))
    }
}
