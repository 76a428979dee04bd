//! Static copy of the landing page.
//!
//! Everything here is presentational: the layout measures it and the view
//! draws it, but no behavior depends on the exact wording. Image paths are
//! kept as inert strings.

use crate::color::{Gradient, palette};
use crate::page::section::SectionId;
use std::time::{SystemTime, UNIX_EPOCH};

pub const BRAND: &str = "CryptoVault";
pub const BRAND_ICON: char = '◆';
pub const GET_STARTED: &str = "Get Started";

/// Badge, heading and lead paragraph at the top of a section.
#[derive(Clone, Copy, Debug)]
pub struct SectionCopy {
    pub badge: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct HeroCopy {
    pub badge: &'static str,
    pub title_lead: &'static str,
    pub title_accent: &'static str,
    pub title_tail: &'static str,
    pub body: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub image: &'static str,
}

pub const HERO: HeroCopy = HeroCopy {
    badge: "Secure & Safe Crypto Currency",
    title_lead: "Make your ",
    title_accent: "Crypto",
    title_tail: "Transaction effortless",
    body: "Buy and sell 100+ cryptocurrencies with 20+ fiat currencies using bank transfers or cards, secure, fast, and intuitive.",
    primary: "▶ How It Works",
    secondary: "White Papers",
    image: "/images/bitcoin-hologram.png",
};

#[derive(Clone, Copy, Debug)]
pub struct CryptoPrice {
    pub name: &'static str,
    pub symbol: &'static str,
    pub price: &'static str,
    pub change: &'static str,
    pub is_positive: bool,
    pub icon: char,
    pub color: Gradient,
}

pub const PRICES: [CryptoPrice; 3] = [
    CryptoPrice {
        name: "Bitcoin",
        symbol: "BTC",
        price: "90,360.50",
        change: "+3.08%",
        is_positive: true,
        icon: '₿',
        color: Gradient::new(palette::ORANGE_500, palette::YELLOW_500),
    },
    CryptoPrice {
        name: "Ethereum",
        symbol: "ETH",
        price: "3,240.75",
        change: "+1.24%",
        is_positive: true,
        icon: 'Ξ',
        color: Gradient::new(palette::BLUE_500, palette::PURPLE_500),
    },
    CryptoPrice {
        name: "Solana",
        symbol: "SOL",
        price: "245.80",
        change: "-0.85%",
        is_positive: false,
        icon: '◎',
        color: Gradient::new(palette::PURPLE_500, palette::PINK_500),
    },
];

pub const MARKET: SectionCopy = SectionCopy {
    badge: "",
    heading: "The Future of Digital Assets",
    body: "Experience the next generation of cryptocurrency management with our cutting-edge platform that combines security, usability, and advanced analytics.",
};

#[derive(Clone, Copy, Debug)]
pub struct Feature {
    pub icon: char,
    pub title: &'static str,
    pub description: &'static str,
    pub gradient: Gradient,
}

pub const FEATURES_INTRO: SectionCopy = SectionCopy {
    badge: "Powerful Features",
    heading: "Everything You Need",
    body: "Manage your crypto portfolio with confidence using our advanced features",
};

pub const FEATURES: [Feature; 6] = [
    Feature {
        icon: '↗',
        title: "Real-Time Portfolio",
        description: "Track your assets with live price updates and detailed analytics",
        gradient: Gradient::new(palette::CYAN_500, palette::BLUE_500),
    },
    Feature {
        icon: '◉',
        title: "NFT Viewer",
        description: "Browse and manage your NFT collection with stunning visuals",
        gradient: Gradient::new(palette::PURPLE_500, palette::PINK_500),
    },
    Feature {
        icon: '⊚',
        title: "Multi-Chain Wallet",
        description: "Support for Ethereum, Bitcoin, Solana, and 50+ blockchains",
        gradient: Gradient::new(palette::GREEN_500, palette::TEAL_500),
    },
    Feature {
        icon: 'ϟ',
        title: "DEX Integration",
        description: "Swap tokens directly with the best rates across DEXs",
        gradient: Gradient::new(palette::YELLOW_500, palette::ORANGE_500),
    },
    Feature {
        icon: '◈',
        title: "Biometric Security",
        description: "Face ID and fingerprint authentication for maximum security",
        gradient: Gradient::new(palette::RED_500, palette::PINK_500),
    },
    Feature {
        icon: '☍',
        title: "Social Trading",
        description: "Follow top traders and copy their successful strategies",
        gradient: Gradient::new(palette::INDIGO_500, palette::PURPLE_500),
    },
];

#[derive(Clone, Copy, Debug)]
pub struct Demo {
    pub title: &'static str,
    pub image: &'static str,
    pub description: &'static str,
}

pub const DEMO_INTRO: SectionCopy = SectionCopy {
    badge: "Live Demo",
    heading: "See It In Action",
    body: "Experience the intuitive interface and powerful features of CryptoVault",
};

pub const DEMOS: [Demo; 3] = [
    Demo {
        title: "Advanced Portfolio Analytics",
        image: "/images/hero-market-bg.png",
        description: "Comprehensive market analysis with real-time data visualization and advanced trading indicators.",
    },
    Demo {
        title: "Secure Wallet Interface",
        image: "/images/security-3d.png",
        description: "Multi-layered security dashboard with biometric authentication and encrypted transactions.",
    },
    Demo {
        title: "Interactive User Experience",
        image: "/images/user-interaction-dashboard.png",
        description: "Intuitive user interface designed for seamless crypto management and portfolio tracking.",
    },
];

#[derive(Clone, Copy, Debug)]
pub struct SecurityItem {
    pub icon: char,
    pub title: &'static str,
    pub description: &'static str,
    pub color: Gradient,
}

pub const SECURITY_INTRO: SectionCopy = SectionCopy {
    badge: "About Security",
    heading: "Bank-Grade Security",
    body: "We use multi-layered protection, hardware wallet compatibility, and regular audits to keep your funds safe.",
};

pub const SECURITY_ITEMS: [SecurityItem; 3] = [
    SecurityItem {
        icon: '◈',
        title: "End-to-End Encryption",
        description: "Your keys & transactions are encrypted and never leave your device.",
        color: Gradient::new(palette::CYAN_500, palette::BLUE_500),
    },
    SecurityItem {
        icon: '⊠',
        title: "Multi-Sig Support",
        description: "Require multiple approvals for high-value transactions.",
        color: Gradient::new(palette::YELLOW_500, palette::ORANGE_500),
    },
    SecurityItem {
        icon: '◉',
        title: "Open-Source Audits",
        description: "Frequent external audits and a transparent security model.",
        color: Gradient::new(palette::GREEN_500, palette::TEAL_500),
    },
];

pub const SECURITY_IMAGE: &str = "/images/security-laptop-3d.png";

pub const INTERACTIVE_INTRO: SectionCopy = SectionCopy {
    badge: "Interactive Experience",
    heading: "Intuitive Dashboard Design",
    body: "Our user-centric design puts you in complete control with an interface that's both powerful and easy to use.",
};

pub const INTERACTIVE_POINTS: [&str; 4] = [
    "Real-time portfolio tracking",
    "Advanced charting tools",
    "One-click trading execution",
    "Multi-device synchronization",
];

pub const INTERACTIVE_IMAGE: &str = "/images/user-dashboard-interaction.png";

#[derive(Clone, Copy, Debug)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub image: &'static str,
    pub rating: u8,
    pub text: &'static str,
}

pub const TESTIMONIALS_INTRO: SectionCopy = SectionCopy {
    badge: "Testimonials",
    heading: "Trusted by Thousands",
    body: "See what our users are saying about CryptoVault",
};

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        name: "Sarah Chen",
        role: "DeFi Trader",
        image: "/images/testimonial-1.png",
        rating: 5,
        text: "The most intuitive crypto wallet I've ever used. The security features give me complete peace of mind.",
    },
    Testimonial {
        name: "Marcus Rodriguez",
        role: "NFT Collector",
        image: "/images/testimonial-2.png",
        rating: 5,
        text: "Love the NFT viewer and multi-chain support. Managing my portfolio has never been easier.",
    },
    Testimonial {
        name: "Alex Kim",
        role: "Crypto Enthusiast",
        image: "/images/testimonial-3.png",
        rating: 5,
        text: "Open-source, self-custodial, and beautiful design. Everything I wanted in a crypto wallet.",
    },
];

pub const DOWNLOAD_INTRO: SectionCopy = SectionCopy {
    badge: "Download App",
    heading: "Get Started Today",
    body: "Download CryptoVault and take control of your digital assets with the most secure wallet",
};

pub const STORE_BUTTONS: [&str; 2] = ["⤓ App Store", "▶ Google Play"];

pub const FOOTER_TAGLINE: &str = "The most secure and user-friendly crypto wallet for managing your digital assets with complete control and peace of mind.";

pub const SOCIAL_LINKS: [&str; 4] = ["Chat", "Twitter", "Telegram", "GitHub"];

pub const QUICK_LINKS_HEADING: &str = "Quick Links";

pub const QUICK_LINKS: [SectionId; 4] = [
    SectionId::Home,
    SectionId::Features,
    SectionId::Security,
    SectionId::Download,
];

pub const RESOURCES_HEADING: &str = "Resources";

pub const RESOURCES: [&str; 5] = ["Documentation", "API", "White Paper", "Blog", "Help Center"];

pub const LEGAL_LINKS: [&str; 3] = ["Privacy Policy", "Terms of Service", "Cookie Policy"];

#[must_use]
pub fn copyright(year: i32) -> String {
    format!("© {year} {BRAND}. All rights reserved.")
}

/// Current calendar year (UTC) from the system clock.
#[must_use]
pub fn current_year() -> i32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    year_from_unix_days((secs / 86_400) as i64)
}

/// Civil year of a day count since 1970-01-01 (proleptic Gregorian).
fn year_from_unix_days(days: i64) -> i32 {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    year as i32
}

/// Filled rating stars.
#[must_use]
pub fn stars(rating: u8) -> String {
    "★".repeat(usize::from(rating.min(5)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_testimonials_in_order() {
        let names: Vec<_> = TESTIMONIALS.iter().map(|t| t.name).collect();
        assert_eq!(names, ["Sarah Chen", "Marcus Rodriguez", "Alex Kim"]);
        assert!(TESTIMONIALS.iter().all(|t| t.rating == 5));
    }

    #[test]
    fn test_prices_sign_matches_change() {
        for price in PRICES {
            assert_eq!(price.is_positive, price.change.starts_with('+'), "{}", price.symbol);
        }
        assert_eq!(PRICES[0].price, "90,360.50");
    }

    #[test]
    fn test_quick_links_follow_page_order() {
        assert!(QUICK_LINKS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_year_from_unix_days() {
        assert_eq!(year_from_unix_days(0), 1970);
        assert_eq!(year_from_unix_days(364), 1970);
        assert_eq!(year_from_unix_days(365), 1971);
        // 2024-02-29 and 2024-12-31
        assert_eq!(year_from_unix_days(19_782), 2024);
        assert_eq!(year_from_unix_days(20_088), 2024);
        assert_eq!(year_from_unix_days(20_089), 2025);
    }

    #[test]
    fn test_copyright_line() {
        assert_eq!(copyright(2025), "© 2025 CryptoVault. All rights reserved.");
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(5), "★★★★★");
        assert_eq!(stars(9).chars().count(), 5);
    }
}
