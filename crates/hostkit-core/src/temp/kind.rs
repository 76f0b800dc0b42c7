//! Temp file kinds and their name parts.

use std::fmt;
use std::str::FromStr;

/// Leading marker shared by every temp file prefix.
///
/// The registry recognizes temp files of any kind by this marker alone.
pub const TEMP_PREFIX_ALL: &str = "hostkit-tmp-";

/// What a temp file holds. Each kind has a fixed `(prefix, suffix)` pair.
///
/// ```rust
/// use hostkit_core::temp::{TempFileKind, TEMP_PREFIX_ALL};
///
/// for kind in TempFileKind::ALL {
///     assert!(kind.prefix().starts_with(TEMP_PREFIX_ALL));
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempFileKind
{
    /// Intermediate binary cache
    Cache,
    /// Rendered still image
    Render,
    /// Rendered animation
    Animation,
    /// Captured log output
    Log,
}

impl TempFileKind
{
    /// Every kind, in declaration order.
    pub const ALL: [TempFileKind; 4] = [
        TempFileKind::Cache,
        TempFileKind::Render,
        TempFileKind::Animation,
        TempFileKind::Log,
    ];

    /// File name prefix; always starts with [`TEMP_PREFIX_ALL`].
    #[must_use]
    pub const fn prefix(self) -> &'static str
    {
        match self {
            TempFileKind::Cache => "hostkit-tmp-cache-",
            TempFileKind::Render => "hostkit-tmp-render-",
            TempFileKind::Animation => "hostkit-tmp-anim-",
            TempFileKind::Log => "hostkit-tmp-log-",
        }
    }

    /// File name suffix, naming the content type.
    #[must_use]
    pub const fn suffix(self) -> &'static str
    {
        match self {
            TempFileKind::Cache => ".bin",
            TempFileKind::Render => ".png",
            TempFileKind::Animation => ".mov",
            TempFileKind::Log => ".log",
        }
    }

    /// Short lowercase name, as accepted by `FromStr`.
    #[must_use]
    pub const fn name(self) -> &'static str
    {
        match self {
            TempFileKind::Cache => "cache",
            TempFileKind::Render => "render",
            TempFileKind::Animation => "animation",
            TempFileKind::Log => "log",
        }
    }
}

impl fmt::Display for TempFileKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.name())
    }
}

impl FromStr for TempFileKind
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "cache" => Ok(TempFileKind::Cache),
            "render" | "image" => Ok(TempFileKind::Render),
            "animation" | "anim" | "movie" => Ok(TempFileKind::Animation),
            "log" => Ok(TempFileKind::Log),
            _ => Err(format!(
                "Unknown temp file kind: {s}. Use 'cache', 'render', 'animation', or 'log'"
            )),
        }
    }
}

#[cfg(test)]
mod tests
{
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_prefixes_carry_marker()
    {
        for kind in TempFileKind::ALL {
            assert!(kind.prefix().len() > TEMP_PREFIX_ALL.len());
            assert!(kind.prefix().starts_with(TEMP_PREFIX_ALL));
        }
    }

    #[test]
    fn test_prefixes_are_distinct()
    {
        let prefixes: HashSet<_> = TempFileKind::ALL.iter().map(|kind| kind.prefix()).collect();
        assert_eq!(prefixes.len(), TempFileKind::ALL.len());
    }

    #[test]
    fn test_kind_from_str()
    {
        for kind in TempFileKind::ALL {
            assert_eq!(kind.name().parse::<TempFileKind>().unwrap(), kind);
        }
        assert_eq!("MOVIE".parse::<TempFileKind>().unwrap(), TempFileKind::Animation);
        assert!("pdf".parse::<TempFileKind>().is_err());
    }
}
