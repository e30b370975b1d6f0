//! Symbol alphabet and image keys

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A symbol identity shown in a reel slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolKey {
    Symbol1,
    Symbol2,
    Symbol3,
    Symbol4,
    Symbol5,
}

impl SymbolKey {
    pub const ALL: [SymbolKey; 5] = [
        SymbolKey::Symbol1,
        SymbolKey::Symbol2,
        SymbolKey::Symbol3,
        SymbolKey::Symbol4,
        SymbolKey::Symbol5,
    ];

    /// Pick a symbol uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Image backing this symbol
    pub fn image(self) -> ImageKey {
        match self {
            SymbolKey::Symbol1 => ImageKey::Symbol1,
            SymbolKey::Symbol2 => ImageKey::Symbol2,
            SymbolKey::Symbol3 => ImageKey::Symbol3,
            SymbolKey::Symbol4 => ImageKey::Symbol4,
            SymbolKey::Symbol5 => ImageKey::Symbol5,
        }
    }
}

/// Every image the asset manifest can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageKey {
    Symbol1,
    Symbol2,
    Symbol3,
    Symbol4,
    Symbol5,
    Background,
    SpinButtonActive,
    SpinButtonInactive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_covers_alphabet() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let key = SymbolKey::random(&mut rng);
            let idx = SymbolKey::ALL.iter().position(|k| *k == key).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_image_key_serializes_camel_case() {
        let json = serde_json::to_string(&ImageKey::SpinButtonInactive).unwrap();
        assert_eq!(json, "\"spinButtonInactive\"");
        assert_eq!(SymbolKey::Symbol3.image(), ImageKey::Symbol3);
    }
}
