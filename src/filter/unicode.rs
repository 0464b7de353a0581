//! Plain-text rendering of small inline-math snippets.
//!
//! Callout titles end up in HTML attributes, where MathJax never runs, so
//! `$\alpha$-stable` has to become `α-stable` before it gets there.

use lazy_static::lazy_static;
use phf::phf_map;
use regex::{Captures, Regex};

static SYMBOLS: phf::Map<&'static str, &'static str> = phf_map! {
    "alpha" => "α", "beta" => "β", "gamma" => "γ", "delta" => "δ",
    "epsilon" => "ϵ", "varepsilon" => "ε", "zeta" => "ζ", "eta" => "η",
    "theta" => "θ", "vartheta" => "ϑ", "iota" => "ι", "kappa" => "κ",
    "lambda" => "λ", "mu" => "μ", "nu" => "ν", "xi" => "ξ", "pi" => "π",
    "rho" => "ρ", "sigma" => "σ", "tau" => "τ", "upsilon" => "υ",
    "phi" => "ϕ", "varphi" => "φ", "chi" => "χ", "psi" => "ψ", "omega" => "ω",
    "Gamma" => "Γ", "Delta" => "Δ", "Theta" => "Θ", "Lambda" => "Λ",
    "Xi" => "Ξ", "Pi" => "Π", "Sigma" => "Σ", "Phi" => "Φ", "Psi" => "Ψ",
    "Omega" => "Ω",
    "leq" => "≤", "le" => "≤", "geq" => "≥", "ge" => "≥", "neq" => "≠",
    "ne" => "≠", "approx" => "≈", "sim" => "∼", "equiv" => "≡",
    "in" => "∈", "notin" => "∉", "subseteq" => "⊆", "subset" => "⊂",
    "cup" => "∪", "cap" => "∩", "emptyset" => "∅", "infty" => "∞",
    "times" => "×", "cdot" => "⋅", "pm" => "±", "sum" => "∑", "prod" => "∏",
    "int" => "∫", "partial" => "∂", "nabla" => "∇", "forall" => "∀",
    "exists" => "∃", "neg" => "¬", "wedge" => "∧", "vee" => "∨",
    "to" => "→", "rightarrow" => "→", "leftarrow" => "←",
    "Rightarrow" => "⇒", "Leftrightarrow" => "⇔", "mapsto" => "↦",
    "ldots" => "…", "cdots" => "⋯", "circ" => "∘", "ell" => "ℓ",
    "mathbb" => "", "mathcal" => "", "mathrm" => "", "mathbf" => "",
    "text" => "", "left" => "", "right" => "",
};

lazy_static! {
    static ref INLINE_MATH: Regex = Regex::new(r"\$([^$]+)\$").unwrap();
    static ref COMMAND: Regex = Regex::new(r"\\([A-Za-z]+|.)").unwrap();
}

fn math_text(math: &str) -> String {
    let replaced = COMMAND.replace_all(math, |caps: &Captures| {
        let name = &caps[1];
        match SYMBOLS.get(name) {
            Some(symbol) => symbol.to_string(),
            None if name == "," || name == ";" || name == " " => " ".to_string(),
            None => name.to_string(),
        }
    });
    replaced
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '^' | '_'))
        .collect()
}

/// Replace every `$...$` span of `text` by its plain-text rendering.
pub fn math_to_unicode(text: &str) -> String {
    INLINE_MATH
        .replace_all(text, |caps: &Captures| math_text(&caps[1]))
        .into_owned()
}
