//! Video URI parsing.
//!
//! URIs take the form `scheme:[key1=value1,key2=value2,...]//locator`. The
//! locator is kept verbatim: compositional backends parse it again as a nested
//! URI, terminal backends treat it as a device or file address.

use {
    crate::*,
    base::Vec2,
    std::{collections::HashMap, fmt, str::FromStr},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    pub scheme: String,
    pub locator: String,
    pub params: HashMap<String, String>,
}

/// Parse a URI string.
pub fn parse_uri(uri: &str) -> Result<Uri, VideoError> {
    let malformed = |reason: &str| VideoError::MalformedUri {
        uri: uri.to_string(),
        reason: reason.to_string(),
    };

    let (scheme, mut rest) = uri
        .split_once(':')
        .ok_or_else(|| malformed("missing ':' after scheme"))?;
    if scheme.is_empty() {
        return Err(malformed("empty scheme"));
    }

    let mut params = HashMap::new();
    if let Some(after_bracket) = rest.strip_prefix('[') {
        let (list, remainder) = after_bracket
            .split_once(']')
            .ok_or_else(|| malformed("unterminated parameter list"))?;
        // `[]` is an empty list, but every listed pair must be present
        for pair in list.split(',').filter(|_| !list.is_empty()) {
            if pair.is_empty() {
                return Err(malformed("empty parameter in list"));
            }
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| malformed(&format!("parameter {pair:?} has no '='")))?;
            if key.is_empty() {
                return Err(malformed("empty parameter name"));
            }
            params.insert(key.to_string(), value.to_string());
        }
        rest = remainder;
    }

    let locator = rest
        .strip_prefix("//")
        .ok_or_else(|| malformed("expected '//' before locator"))?;

    Ok(Uri {
        scheme: scheme.to_string(),
        locator: locator.to_string(),
        params,
    })
}

impl Uri {
    pub fn new(scheme: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            locator: locator.into(),
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Convert the value stored under `key`, or return `default` untouched when absent.
    fn get_with<T>(
        &self,
        key: &str,
        default: T,
        convert: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, VideoError> {
        match self.params.get(key) {
            None => Ok(default),
            Some(value) => convert(value).ok_or_else(|| VideoError::InvalidParameter {
                key: key.to_string(),
                value: value.clone(),
            }),
        }
    }

    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.params.get(key).map(String::as_str).unwrap_or(default)
    }

    pub fn get_int(&self, key: &str, default: i64) -> Result<i64, VideoError> {
        self.get_with(key, default, |value| value.trim().parse().ok())
    }

    pub fn get_uint(&self, key: &str, default: usize) -> Result<usize, VideoError> {
        self.get_with(key, default, |value| value.trim().parse().ok())
    }

    pub fn get_float(&self, key: &str, default: f64) -> Result<f64, VideoError> {
        self.get_with(key, default, |value| {
            value.trim().parse().ok().filter(|v: &f64| v.is_finite())
        })
    }

    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, VideoError> {
        self.get_with(key, default, parse_bool)
    }

    /// `WxH` dimension pair, e.g. `640x480`.
    pub fn get_size(&self, key: &str, default: Vec2<usize>) -> Result<Vec2<usize>, VideoError> {
        self.get_with(key, default, |value| {
            let (w, h) = value.split_once('x')?;
            Some(Vec2::new(w.trim().parse().ok()?, h.trim().parse().ok()?))
        })
    }

    /// `X+Y` offset pair, e.g. `2+2`.
    pub fn get_offset(&self, key: &str, default: Vec2<i64>) -> Result<Vec2<i64>, VideoError> {
        self.get_with(key, default, |value| {
            // skip the first character so a leading sign on X is not taken as the separator
            let split = value.char_indices().skip(1).find(|&(_, c)| c == '+')?.0;
            let (x, y) = (&value[..split], &value[split + 1..]);
            Some(Vec2::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
        })
    }

    /// Pixel format token looked up in the format catalog.
    pub fn get_format(
        &self,
        key: &str,
        default: &'static PixelFormat,
    ) -> Result<&'static PixelFormat, VideoError> {
        self.get_with(key, default, |token| video_format_from_string(token).ok())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl FromStr for Uri {
    type Err = VideoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uri(s)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scheme)?;
        if !self.params.is_empty() {
            let mut keys: Vec<&String> = self.params.keys().collect();
            keys.sort();
            let pairs: Vec<String> = keys
                .into_iter()
                .map(|key| format!("{}={}", key, self.params[key]))
                .collect();
            write!(f, "[{}]", pairs.join(","))?;
        }
        write!(f, "//{}", self.locator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_spellings() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
