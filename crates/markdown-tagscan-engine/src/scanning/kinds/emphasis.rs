use crate::scanning::tag::StyleFlags;

/// How a delimiter run of one trigger character is matched and styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmphasisRules {
    pub trigger: u8,
    /// Longest opening run that counts as delimiters.
    pub max_strength: usize,
    /// Shortest opening run that opens a match at all.
    pub min_strength: usize,
    /// A shorter closing run resolves the matched part of the strength.
    pub partial_close: bool,
    /// Fixed styling; `None` styles by strength.
    pub styling: Option<StyleFlags>,
}

impl EmphasisRules {
    pub const ASTERISK: EmphasisRules = EmphasisRules {
        trigger: b'*',
        max_strength: 3,
        min_strength: 1,
        partial_close: true,
        styling: None,
    };

    pub const UNDERSCORE: EmphasisRules = EmphasisRules {
        trigger: b'_',
        ..Self::ASTERISK
    };

    pub const TILDE: EmphasisRules = EmphasisRules {
        trigger: b'~',
        max_strength: 2,
        min_strength: 2,
        partial_close: false,
        styling: Some(StyleFlags::STRIKETHROUGH),
    };

    pub const ALL: [EmphasisRules; 3] = [Self::ASTERISK, Self::UNDERSCORE, Self::TILDE];

    pub fn for_trigger(byte: u8) -> Option<&'static EmphasisRules> {
        static TABLE: [EmphasisRules; 3] = EmphasisRules::ALL;
        TABLE.iter().find(|rules| rules.trigger == byte)
    }

    /// Whether an opening run of `strength` delimiters is long enough.
    pub fn opens_at(&self, strength: usize) -> bool {
        strength >= self.min_strength && strength <= self.max_strength
    }

    /// Flags for `strength` matched delimiters.
    pub fn flags_for(&self, strength: usize) -> StyleFlags {
        self.styling.unwrap_or_else(|| StyleFlags::for_strength(strength))
    }
}
