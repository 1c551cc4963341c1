use image::RgbaImage;

/// Longest nickname kept, in chars.
pub const NICKNAME_MAX_CHARS: usize = 24;
/// Longest message kept, in chars.
pub const MESSAGE_MAX_CHARS: usize = 300;

/// The visitor's personalisation data.
///
/// Mutated only through the setters; once [`lock`](Profile::lock)ed (the
/// capsule is sealed) every setter is rejected.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    nickname: String,
    avatar: Option<RgbaImage>,
    message: String,
    locked: bool,
}

impl Profile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    #[must_use]
    pub fn avatar(&self) -> Option<&RgbaImage> {
        self.avatar.as_ref()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Nickname set and avatar present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.nickname.is_empty() && self.avatar.is_some()
    }

    /// Trims and truncates to [`NICKNAME_MAX_CHARS`]. Returns whether the
    /// stored nickname changed.
    pub fn set_nickname(&mut self, nickname: &str) -> bool {
        if self.locked {
            return false;
        }
        let nickname = truncate_chars(nickname.trim(), NICKNAME_MAX_CHARS);
        if nickname == self.nickname {
            return false;
        }
        self.nickname = nickname.to_string();
        true
    }

    pub fn set_avatar(&mut self, avatar: RgbaImage) -> bool {
        if self.locked {
            return false;
        }
        self.avatar = Some(avatar);
        true
    }

    /// Truncates to [`MESSAGE_MAX_CHARS`]. Returns whether the stored
    /// message changed.
    pub fn set_message(&mut self, message: &str) -> bool {
        if self.locked {
            return false;
        }
        let message = truncate_chars(message, MESSAGE_MAX_CHARS);
        if message == self.message {
            return false;
        }
        self.message = message.to_string();
        true
    }

    /// Freezes the profile. There is no unlock.
    pub fn lock(&mut self) {
        self.locked = true;
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn locked_profile_rejects_updates() {
        let mut profile = Profile::new();
        assert!(profile.set_nickname("Ada"));
        profile.lock();
        assert!(!profile.set_nickname("Grace"));
        assert!(!profile.set_message("hello"));
        assert!(!profile.set_avatar(RgbaImage::new(1, 1)));
        assert_eq!(profile.nickname(), "Ada");
    }
}
