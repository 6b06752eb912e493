use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for name-derived asset ids (`AssetId::from_name`).
const MOTION_NAMESPACE: Uuid = Uuid::from_u128(0x6d79_7468_2d6d_6f74_696f_6e2d_6173_7365);

/// Identifier of a motion asset.
///
/// The nil uuid is the "unresolved" id: a channel whose configuration has no
/// motion assigned carries `AssetId::INVALID`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(Uuid);

impl AssetId {
    pub const INVALID: Self = Self(Uuid::nil());

    #[inline]
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Random id, for assets created at runtime.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Stable id derived from an asset name (same name, same id).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(Uuid::new_v5(&MOTION_NAMESPACE, name.as_bytes()))
    }

    #[inline]
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.0.is_nil()
    }
}

impl From<Uuid> for AssetId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.hyphenated())
    }
}
