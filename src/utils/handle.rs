use rand::Rng;
use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "silent", "quiet", "hidden", "secret", "mystic", "unknown", "nameless", "faceless",
    "invisible", "phantom", "shadow", "gentle", "brave", "curious", "sleepy", "witty",
    "lucky", "swift", "calm", "bold", "misty", "sunny", "frosty", "amber",
];

const NOUNS: &[&str] = &[
    "panda", "owl", "fox", "bear", "deer", "wolf", "rabbit", "eagle", "tiger", "lion",
    "hawk", "lynx", "otter", "falcon", "heron", "badger", "camel", "gazelle", "raven",
    "sparrow", "dolphin", "koala", "jackal", "viper",
];

/// Produces a pseudo-random display handle such as `quietfox42`.
///
/// Handles are not guaranteed to be unique.
pub fn generate_handle() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("quiet");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("fox");
    let suffix: u8 = rng.gen_range(10..100);

    format!("{}{}{}", adjective, noun, suffix)
}
