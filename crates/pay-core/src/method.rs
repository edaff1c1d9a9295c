//! # Payment Methods and Languages
//!
//! Settlement rails the gateway may offer at checkout, and the languages
//! the hosted checkout page can be rendered in.

use serde::{Deserialize, Serialize};

/// Supported payment rails (mobile wallets, bank wallets, card switch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Telebirr,
    Awash,
    AwashWallet,
    Pss,
    Cbe,
    Amole,
    Boa,
    Kacha,
    Hellocash,
    Mpessa,
}

impl PaymentMethod {
    /// Every supported rail, in canonical order
    pub const ALL: [PaymentMethod; 10] = [
        PaymentMethod::Telebirr,
        PaymentMethod::Awash,
        PaymentMethod::AwashWallet,
        PaymentMethod::Pss,
        PaymentMethod::Cbe,
        PaymentMethod::Amole,
        PaymentMethod::Boa,
        PaymentMethod::Kacha,
        PaymentMethod::Hellocash,
        PaymentMethod::Mpessa,
    ];

    /// Returns the gateway's identifier for this rail
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Telebirr => "TELEBIRR",
            PaymentMethod::Awash => "AWASH",
            PaymentMethod::AwashWallet => "AWASH_WALLET",
            PaymentMethod::Pss => "PSS",
            PaymentMethod::Cbe => "CBE",
            PaymentMethod::Amole => "AMOLE",
            PaymentMethod::Boa => "BOA",
            PaymentMethod::Kacha => "KACHA",
            PaymentMethod::Hellocash => "HELLOCASH",
            PaymentMethod::Mpessa => "MPESSA",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkout page language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Amharic
    Am,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Am => "AM",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
