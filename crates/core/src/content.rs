//! Editable storefront copy.
//!
//! The set of sections and the fields inside each section are fixed; updates
//! replace the value of an existing field and never add or remove one.
//! Every section deserializes with `#[serde(default)]` so a snapshot saved by
//! an older version that lacks a field picks up the compiled-in default.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorefrontError;

/// Content sections, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentSection {
    Hero,
    Newsletter,
    Testimonials,
    FeaturedProducts,
}

impl ContentSection {
    pub const ALL: [ContentSection; 4] = [
        ContentSection::Hero,
        ContentSection::Newsletter,
        ContentSection::Testimonials,
        ContentSection::FeaturedProducts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSection::Hero => "hero",
            ContentSection::Newsletter => "newsletter",
            ContentSection::Testimonials => "testimonials",
            ContentSection::FeaturedProducts => "featuredProducts",
        }
    }

    /// Wire names of the fields this section holds.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ContentSection::Hero => HeroContent::FIELDS,
            ContentSection::Newsletter => NewsletterContent::FIELDS,
            ContentSection::Testimonials => TestimonialsContent::FIELDS,
            ContentSection::FeaturedProducts => FeaturedProductsContent::FIELDS,
        }
    }

    /// Fields rendered as multi-line text areas.
    pub fn is_multiline(&self, field: &str) -> bool {
        matches!(
            (self, field),
            (ContentSection::Hero, "description") | (ContentSection::Newsletter, "description")
        )
    }
}

impl std::fmt::Display for ContentSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentSection {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentSection::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| StorefrontError::UnknownSection(s.to_string()))
    }
}

// ── Sections ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroContent {
    pub badge: String,
    pub heading: String,
    pub heading_accent: String,
    pub description: String,
    pub primary_button: String,
    pub secondary_button: String,
}

impl HeroContent {
    const FIELDS: &'static [&'static str] = &[
        "badge",
        "heading",
        "headingAccent",
        "description",
        "primaryButton",
        "secondaryButton",
    ];

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "badge" => Some(&mut self.badge),
            "heading" => Some(&mut self.heading),
            "headingAccent" => Some(&mut self.heading_accent),
            "description" => Some(&mut self.description),
            "primaryButton" => Some(&mut self.primary_button),
            "secondaryButton" => Some(&mut self.secondary_button),
            _ => None,
        }
    }
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            badge: "New Collection".into(),
            heading: "Discover Your".into(),
            heading_accent: " Perfect Style".into(),
            description: "Shop the latest trends in fashion, electronics, and home goods. \
                          Free shipping on orders over $50. Curated collections for every taste."
                .into(),
            primary_button: "Shop Now".into(),
            secondary_button: "Browse Catalog".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsletterContent {
    pub heading: String,
    pub description: String,
    pub button_text: String,
    pub privacy_note: String,
}

impl NewsletterContent {
    const FIELDS: &'static [&'static str] =
        &["heading", "description", "buttonText", "privacyNote"];

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "heading" => Some(&mut self.heading),
            "description" => Some(&mut self.description),
            "buttonText" => Some(&mut self.button_text),
            "privacyNote" => Some(&mut self.privacy_note),
            _ => None,
        }
    }
}

impl Default for NewsletterContent {
    fn default() -> Self {
        Self {
            heading: "Stay in the Loop".into(),
            description: "Subscribe to our newsletter for exclusive deals, new arrivals, \
                          and style tips delivered straight to your inbox."
                .into(),
            button_text: "Subscribe".into(),
            privacy_note: "No spam, unsubscribe anytime. We respect your privacy.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialsContent {
    pub badge: String,
    pub heading: String,
    pub subheading: String,
}

impl TestimonialsContent {
    const FIELDS: &'static [&'static str] = &["badge", "heading", "subheading"];

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "badge" => Some(&mut self.badge),
            "heading" => Some(&mut self.heading),
            "subheading" => Some(&mut self.subheading),
            _ => None,
        }
    }
}

impl Default for TestimonialsContent {
    fn default() -> Self {
        Self {
            badge: "Testimonials".into(),
            heading: "What Our Customers Say".into(),
            subheading: "Don't just take our word for it, hear from our happy customers".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeaturedProductsContent {
    pub label: String,
    pub heading: String,
    pub view_all_text: String,
}

impl FeaturedProductsContent {
    const FIELDS: &'static [&'static str] = &["label", "heading", "viewAllText"];

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "label" => Some(&mut self.label),
            "heading" => Some(&mut self.heading),
            "viewAllText" => Some(&mut self.view_all_text),
            _ => None,
        }
    }
}

impl Default for FeaturedProductsContent {
    fn default() -> Self {
        Self {
            label: "Our Collection".into(),
            heading: "Featured Products".into(),
            view_all_text: "View All →".into(),
        }
    }
}

// ── Content state ─────────────────────────────────────────────

/// All editable text, grouped by section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentState {
    pub hero: HeroContent,
    pub newsletter: NewsletterContent,
    pub testimonials: TestimonialsContent,
    pub featured_products: FeaturedProductsContent,
}

impl ContentState {
    fn field_mut(&mut self, section: ContentSection, field: &str) -> Option<&mut String> {
        match section {
            ContentSection::Hero => self.hero.field_mut(field),
            ContentSection::Newsletter => self.newsletter.field_mut(field),
            ContentSection::Testimonials => self.testimonials.field_mut(field),
            ContentSection::FeaturedProducts => self.featured_products.field_mut(field),
        }
    }

    /// Current value of one field, `None` if the section has no such field.
    pub fn field(&self, section: ContentSection, field: &str) -> Option<&str> {
        let value = match section {
            ContentSection::Hero => match field {
                "badge" => &self.hero.badge,
                "heading" => &self.hero.heading,
                "headingAccent" => &self.hero.heading_accent,
                "description" => &self.hero.description,
                "primaryButton" => &self.hero.primary_button,
                "secondaryButton" => &self.hero.secondary_button,
                _ => return None,
            },
            ContentSection::Newsletter => match field {
                "heading" => &self.newsletter.heading,
                "description" => &self.newsletter.description,
                "buttonText" => &self.newsletter.button_text,
                "privacyNote" => &self.newsletter.privacy_note,
                _ => return None,
            },
            ContentSection::Testimonials => match field {
                "badge" => &self.testimonials.badge,
                "heading" => &self.testimonials.heading,
                "subheading" => &self.testimonials.subheading,
                _ => return None,
            },
            ContentSection::FeaturedProducts => match field {
                "label" => &self.featured_products.label,
                "heading" => &self.featured_products.heading,
                "viewAllText" => &self.featured_products.view_all_text,
                _ => return None,
            },
        };
        Some(value.as_str())
    }

    /// Replace one field's value. Unknown fields are rejected, never added.
    pub fn set_field(
        &mut self,
        section: ContentSection,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), StorefrontError> {
        let slot = self
            .field_mut(section, field)
            .ok_or_else(|| StorefrontError::UnknownField {
                section: section.to_string(),
                field: field.to_string(),
            })?;
        *slot = value.into();
        Ok(())
    }
}
