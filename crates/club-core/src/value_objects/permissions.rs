//! Club permission flags
//!
//! Defines the closed set of 19 named capabilities a role can grant.
//! Stored per role as one explicit boolean row per key; held in memory
//! as a bitfield.

use bitflags::bitflags;
use std::collections::BTreeMap;
use std::fmt;

bitflags! {
    /// Capability set for a club role
    ///
    /// Every role carries an explicit true/false value for each of these
    /// keys. An absent key is treated as denied everywhere.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u32 {
        const VIEW_ANNOUNCEMENTS   = 1 << 0;
        const CREATE_ANNOUNCEMENTS = 1 << 1;
        const EDIT_ANNOUNCEMENTS   = 1 << 2;
        const DELETE_ANNOUNCEMENTS = 1 << 3;
        const VIEW_EVENTS          = 1 << 4;
        const CREATE_EVENTS        = 1 << 5;
        const EDIT_EVENTS          = 1 << 6;
        const DELETE_EVENTS        = 1 << 7;
        const VIEW_MEMBERS         = 1 << 8;
        const MANAGE_MEMBERS       = 1 << 9;
        const REMOVE_MEMBERS       = 1 << 10;
        const VIEW_ATTENDANCE      = 1 << 11;
        const EXPORT_ATTENDANCE    = 1 << 12;
        const VIEW_STATS           = 1 << 13;
        const MODIFY_CLUB_SETTINGS = 1 << 14;
        const CREATE_ROLES         = 1 << 15;
        const ASSIGN_ROLES         = 1 << 16;
        const MANAGE_ROLES         = 1 << 17;
        const ACCESS_CHAT          = 1 << 18;

        /// Seeded profile for the President system role (everything)
        const PRESIDENT = (1 << 19) - 1;

        /// Seeded profile for the Vice President system role
        const VICE_PRESIDENT = Self::VIEW_ANNOUNCEMENTS.bits()
            | Self::CREATE_ANNOUNCEMENTS.bits()
            | Self::EDIT_ANNOUNCEMENTS.bits()
            | Self::VIEW_EVENTS.bits()
            | Self::CREATE_EVENTS.bits()
            | Self::EDIT_EVENTS.bits()
            | Self::VIEW_MEMBERS.bits()
            | Self::MANAGE_MEMBERS.bits()
            | Self::VIEW_ATTENDANCE.bits()
            | Self::EXPORT_ATTENDANCE.bits()
            | Self::VIEW_STATS.bits()
            | Self::ASSIGN_ROLES.bits()
            | Self::ACCESS_CHAT.bits();

        /// Seeded profile for the Member system role (view-only + chat)
        const MEMBER = Self::VIEW_ANNOUNCEMENTS.bits()
            | Self::VIEW_EVENTS.bits()
            | Self::VIEW_MEMBERS.bits()
            | Self::ACCESS_CHAT.bits();
    }
}

/// Canonical key table, one entry per capability, in storage order.
pub const PERMISSION_KEYS: [(Permissions, &str); 19] = [
    (Permissions::VIEW_ANNOUNCEMENTS, "view_announcements"),
    (Permissions::CREATE_ANNOUNCEMENTS, "create_announcements"),
    (Permissions::EDIT_ANNOUNCEMENTS, "edit_announcements"),
    (Permissions::DELETE_ANNOUNCEMENTS, "delete_announcements"),
    (Permissions::VIEW_EVENTS, "view_events"),
    (Permissions::CREATE_EVENTS, "create_events"),
    (Permissions::EDIT_EVENTS, "edit_events"),
    (Permissions::DELETE_EVENTS, "delete_events"),
    (Permissions::VIEW_MEMBERS, "view_members"),
    (Permissions::MANAGE_MEMBERS, "manage_members"),
    (Permissions::REMOVE_MEMBERS, "remove_members"),
    (Permissions::VIEW_ATTENDANCE, "view_attendance"),
    (Permissions::EXPORT_ATTENDANCE, "export_attendance"),
    (Permissions::VIEW_STATS, "view_stats"),
    (Permissions::MODIFY_CLUB_SETTINGS, "modify_club_settings"),
    (Permissions::CREATE_ROLES, "create_roles"),
    (Permissions::ASSIGN_ROLES, "assign_roles"),
    (Permissions::MANAGE_ROLES, "manage_roles"),
    (Permissions::ACCESS_CHAT, "access_chat"),
];

impl Permissions {
    /// Check if the set contains a required capability
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        self.contains(permission)
    }

    /// Resolve a storage key to its capability flag
    ///
    /// Returns `None` for unknown keys; callers must reject them instead of
    /// silently ignoring them.
    pub fn from_key(key: &str) -> Option<Permissions> {
        PERMISSION_KEYS
            .iter()
            .find(|(_, k)| *k == key)
            .map(|(flag, _)| *flag)
    }

    /// Canonical storage key for a single-capability flag
    pub fn key(&self) -> Option<&'static str> {
        PERMISSION_KEYS
            .iter()
            .find(|(flag, _)| *flag == *self)
            .map(|(_, k)| *k)
    }

    /// Full key → granted mapping, one entry per capability (never sparse)
    pub fn to_map(&self) -> BTreeMap<&'static str, bool> {
        PERMISSION_KEYS
            .iter()
            .map(|(flag, key)| (*key, self.contains(*flag)))
            .collect()
    }

    /// Keys of every granted capability, in storage order
    pub fn granted_keys(&self) -> Vec<&'static str> {
        PERMISSION_KEYS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, key)| *key)
            .collect()
    }

    /// Get the raw bits as i32 (number of keys fits comfortably)
    #[inline]
    pub fn to_i32(self) -> i32 {
        self.bits() as i32
    }

    /// Create from raw bits, dropping any unknown bits
    #[inline]
    pub fn from_i32(bits: i32) -> Self {
        Permissions::from_bits_truncate(bits as u32)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.granted_keys().join(", "))
    }
}
