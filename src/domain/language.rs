/// Languages with first-class support from the regional speech and translation
/// provider. Membership is checked on normalized base codes.
pub const REGIONAL_LANGUAGES: [&str; 22] = [
    "as", "bn", "brx", "doi", "gu", "hi", "kn", "kok", "ks", "mai", "ml",
    "mni", "mr", "ne", "or", "pa", "sa", "sat", "sd", "ta", "te", "ur",
];

/// Reduce a language tag to its base subtag: everything before the first `-`,
/// lowercased. `"hi-IN"` becomes `"hi"`, `"pt-BR"` becomes `"pt"`.
pub fn normalize(code: &str) -> String {
    code.split('-').next().unwrap_or("").to_lowercase()
}

/// Whether the language has native support from the regional provider.
pub fn is_regional(code: &str) -> bool {
    let base = normalize(code);
    REGIONAL_LANGUAGES.contains(&base.as_str())
}

/// Map a language tag to the regional provider's own code scheme.
///
/// Everything becomes `{base}-IN`, including English. The one exception is
/// Odia: ISO 639 says `or`, the provider's vocabulary says `od`.
pub fn regional_provider_code(code: &str) -> String {
    let base = normalize(code);
    if base == "or" {
        return "od-IN".to_string();
    }
    format!("{base}-IN")
}
