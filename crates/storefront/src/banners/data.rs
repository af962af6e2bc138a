//! Built-in promotional banners.

use chrono::{DateTime, TimeZone, Utc};
use enzobay_core::{
    Banner, BannerAnimation, BannerId, BannerPosition, BannerSize, BannerStatus, BannerStyle,
};

fn date(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

fn style(background: &str, text: &str, animation: BannerAnimation, size: BannerSize) -> BannerStyle {
    BannerStyle {
        background_color: background.to_string(),
        text_color: text.to_string(),
        animation,
        size,
    }
}

#[allow(clippy::too_many_arguments)]
fn banner(
    id: &str,
    title: &str,
    subtitle: Option<&str>,
    cta: (&str, &str),
    position: BannerPosition,
    status: BannerStatus,
    priority: u32,
    window: (Option<DateTime<Utc>>, Option<DateTime<Utc>>),
    style: BannerStyle,
) -> Banner {
    Banner {
        id: BannerId::new(id),
        title: title.to_string(),
        subtitle: subtitle.map(str::to_string),
        description: None,
        cta_text: cta.0.to_string(),
        cta_link: cta.1.to_string(),
        image: format!("/images/banners/{id}.jpg"),
        position,
        status,
        priority,
        start_date: window.0,
        end_date: window.1,
        style,
    }
}

/// The storefront's banner list.
///
/// Includes an inactive and an expired `home_top` banner so the filtering
/// rules are visible against real data.
#[must_use]
pub fn builtin_banners() -> Vec<Banner> {
    use BannerAnimation::{Fade, None as Still, Slide, Zoom};
    use BannerPosition::{
        CategoryTop, CheckoutTop, HomeBottom, HomeMiddle, HomeTop, ProductSidebar,
    };
    use BannerSize::{Full, Large, Medium, Small};
    use BannerStatus::{Active, Inactive};

    vec![
        banner(
            "banner-home-hero",
            "Mega Electronics Sale",
            Some("Up to 40% off headphones, watches and more"),
            ("Shop Now", "/category/electronics"),
            HomeTop,
            Active,
            1,
            (date(2024, 1, 1), None),
            style("#1e3a8a", "#ffffff", Slide, Full),
        ),
        banner(
            "banner-home-fashion",
            "New Season Arrivals",
            Some("Fresh styles for every wardrobe"),
            ("Explore", "/category/fashion"),
            HomeTop,
            Active,
            2,
            (None, None),
            style("#fdf2f8", "#831843", Fade, Large),
        ),
        banner(
            "banner-home-draft",
            "Coming Soon: Smart Home Week",
            None,
            ("Notify Me", "/category/home"),
            HomeTop,
            Inactive,
            0,
            (None, None),
            style("#ecfdf5", "#065f46", Still, Large),
        ),
        banner(
            "banner-home-expired",
            "Festive Clearance",
            Some("Last chance deals"),
            ("Shop Deals", "/deals"),
            HomeTop,
            Active,
            0,
            (date(2023, 10, 1), date(2023, 12, 31)),
            style("#7f1d1d", "#fef2f2", Zoom, Full),
        ),
        banner(
            "banner-home-shipping",
            "Free Shipping Over $500",
            None,
            ("Learn More", "/shipping"),
            HomeMiddle,
            Active,
            1,
            (None, None),
            style("#f3f4f6", "#111827", Still, Medium),
        ),
        banner(
            "banner-home-newsletter",
            "Join the Enzobay Club",
            Some("Members get early access to sales"),
            ("Sign Up", "/register"),
            HomeBottom,
            Active,
            1,
            (None, None),
            style("#111827", "#f9fafb", Fade, Large),
        ),
        banner(
            "banner-category-sports",
            "Gear Up for the Season",
            None,
            ("Browse Sports", "/category/sports"),
            CategoryTop,
            Active,
            1,
            (date(2024, 3, 1), None),
            style("#ecfccb", "#365314", Slide, Medium),
        ),
        banner(
            "banner-sidebar-bundle",
            "Bundle & Save 15%",
            Some("Pair any laptop with accessories"),
            ("See Bundles", "/bundles"),
            ProductSidebar,
            Active,
            1,
            (None, None),
            style("#fff7ed", "#9a3412", Still, Small),
        ),
        banner(
            "banner-checkout-secure",
            "Secure Checkout",
            Some("Your payment details are never stored"),
            ("Read Policy", "/privacy"),
            CheckoutTop,
            Active,
            1,
            (None, None),
            style("#eff6ff", "#1e40af", Still, Small),
        ),
    ]
}
