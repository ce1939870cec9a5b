#[cfg(test)]
pub const VALID_POST: &str = r#"---
title: "5 Ways to Reduce Patient No-Shows"
excerpt: "Missed appointments drain revenue and disrupt care. Here are five proven, low-effort strategies clinics use to cut patient no-shows and keep schedules full every day."
author:
  name: "Dr. Jane Smith"
  role: "Practice Consultant"
  avatar: "/images/authors/jane-smith.jpg"
publishedAt: "2024-03-01"
updatedAt: "2024-03-05"
category: "practice-management"
tags:
  - scheduling
  - reminders
  - patient engagement
featuredImage: "/images/blog/no-shows.jpg"
seo:
  title: "5 Ways to Reduce Patient No-Shows at Your Clinic"
  description: "Learn five proven strategies to reduce patient no-shows, from automated reminders to flexible scheduling, and keep your clinic calendar full all week long."
  keywords:
    - patient no-shows
    - appointment reminders
    - clinic scheduling
    - practice management
    - patient engagement
---

Missed appointments cost clinics thousands of dollars every year.

## 1. Send automated reminders

Text and email reminders sent 48 hours ahead cut no-shows dramatically.
"#;

#[cfg(test)]
pub const COMPLIANCE_POST: &str = r#"---
title: "HIPAA Compliance Essentials for Small Clinics"
excerpt: "A practical walkthrough of the HIPAA rules that matter most to small practices, including the privacy rule, breach notification and vendor agreements today."
author:
  name: "Mark Lee"
  role: "Compliance Officer"
publishedAt: "2024-02-10"
category: "compliance"
tags: [hipaa, privacy, security]
featuredImage: "/images/blog/hipaa.jpg"
seo:
  title: "HIPAA Compliance Essentials for Small Clinics"
  description: "Understand the HIPAA privacy rule, breach notification duties and business associate agreements so your small practice stays compliant and avoids fines."
  keywords: [hipaa, compliance, privacy rule, breach notification, small clinics]
---

Compliance is not optional. Every clinic handling patient records must follow the privacy rule.
"#;

/// A valid post whose fields can be overridden one at a time.
#[cfg(test)]
pub struct PostFixture {
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub avatar: Option<String>,
    pub published_at: String,
    pub category: String,
    pub tags: Vec<String>,
    pub featured_image: String,
    pub draft: String,
    pub body: String,
}

#[cfg(test)]
impl PostFixture {
    pub fn new(title: &str, published_at: &str) -> Self {
        PostFixture {
            title: title.to_string(),
            excerpt: "An in-depth look at a topic our readers ask about most often, with concrete steps that any practice can start applying this week to see measurable results.".to_string(),
            author: "Dr. Jane Smith".to_string(),
            avatar: None,
            published_at: published_at.to_string(),
            category: "technology".to_string(),
            tags: vec!["general".to_string()],
            featured_image: "/images/blog/cover.jpg".to_string(),
            draft: "false".to_string(),
            body: "Plain body text.".to_string(),
        }
    }

    pub fn excerpt(mut self, excerpt: &str) -> Self {
        self.excerpt = excerpt.to_string();
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }

    pub fn avatar(mut self, avatar: &str) -> Self {
        self.avatar = Some(avatar.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn featured_image(mut self, path: &str) -> Self {
        self.featured_image = path.to_string();
        self
    }

    pub fn draft(self) -> Self {
        self.draft_value("true")
    }

    /// Raw YAML written after `draft:`.
    pub fn draft_value(mut self, value: &str) -> Self {
        self.draft = value.to_string();
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn render(&self) -> String {
        let tags = self.tags.iter()
            .map(|t| format!("\"{}\"", t))
            .collect::<Vec<_>>()
            .join(", ");
        let avatar = match self.avatar {
            Some(ref avatar) => format!("\n  avatar: \"{}\"", avatar),
            None => String::new(),
        };

        format!(r#"---
title: "{}"
excerpt: "{}"
author:
  name: "{}"
  role: "Writer"{}
publishedAt: "{}"
category: "{}"
tags: [{}]
featuredImage: "{}"
draft: {}
seo:
  title: "5 Ways to Reduce Patient No-Shows at Your Clinic"
  description: "Learn five proven strategies to reduce patient no-shows, from automated reminders to flexible scheduling, and keep your clinic calendar full all week long."
  keywords: [one, two, three, four, five]
---
{}
"#, self.title, self.excerpt, self.author, avatar, self.published_at, self.category, tags, self.featured_image, self.draft, self.body)
    }
}
