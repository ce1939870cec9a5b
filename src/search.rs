use serde::Serialize;

use crate::post::Post;

const TITLE_SCORE: u32 = 100;
const EXCERPT_SCORE: u32 = 50;
const TAGS_SCORE: u32 = 25;
const CONTENT_SCORE: u32 = 10;

const SAME_CATEGORY_SCORE: u32 = 10;
const SHARED_TAG_SCORE: u32 = 5;
const SAME_AUTHOR_SCORE: u32 = 3;
const CLOSE_DATE_SCORE: u32 = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedField {
    Title,
    Excerpt,
    Content,
    Tags,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub post: Post,
    pub score: u32,
    pub matched_in: Vec<MatchedField>,
}

/// Case-insensitive substring search over title, excerpt, content and tags.
/// Every matching field adds to the score; results are ordered by score, ties keep input order.
pub fn search_posts(posts: &[Post], keyword: &str) -> Vec<SearchResult> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return vec![];
    }

    let mut results: Vec<SearchResult> = posts.iter()
        .filter_map(|post| match_post(post, &keyword))
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}

fn match_post(post: &Post, keyword: &str) -> Option<SearchResult> {
    let contains = |text: &str| text.to_lowercase().contains(keyword);

    let mut matched_in = vec![];
    let mut score = 0;

    if contains(post.title.as_str()) {
        matched_in.push(MatchedField::Title);
        score += TITLE_SCORE;
    }
    if contains(post.excerpt.as_str()) {
        matched_in.push(MatchedField::Excerpt);
        score += EXCERPT_SCORE;
    }
    if post.content.as_deref().is_some_and(contains) {
        matched_in.push(MatchedField::Content);
        score += CONTENT_SCORE;
    }
    if post.tags.iter().any(|t| contains(t.as_str())) {
        matched_in.push(MatchedField::Tags);
        score += TAGS_SCORE;
    }

    if matched_in.is_empty() {
        return None;
    }

    Some(SearchResult {
        post: post.clone(),
        score,
        matched_in,
    })
}

/// Title words longer than two characters and tags that start with `partial`.
pub fn search_suggestions(posts: &[Post], partial: &str, limit: usize) -> Vec<String> {
    let partial = partial.trim().to_lowercase();
    if partial.chars().count() < 2 || limit == 0 {
        return vec![];
    }

    let mut suggestions: Vec<String> = vec![];
    let mut add = |candidate: String| {
        if candidate.starts_with(&partial) && !suggestions.contains(&candidate) {
            suggestions.push(candidate);
        }
        suggestions.len() >= limit
    };

    for post in posts {
        for word in post.title.split_whitespace() {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
            if word.chars().count() > 2 && add(word) {
                return suggestions;
            }
        }
        for tag in post.tags.iter() {
            if add(tag.to_lowercase()) {
                return suggestions;
            }
        }
    }

    suggestions
}

fn relatedness(current: &Post, other: &Post, window_days: i64) -> u32 {
    let mut score = 0;

    if other.category == current.category {
        score += SAME_CATEGORY_SCORE;
    }

    let shared_tags = current.tags.iter().filter(|t| other.has_tag(t)).count() as u32;
    score += shared_tags * SHARED_TAG_SCORE;

    if other.author.name == current.author.name {
        score += SAME_AUTHOR_SCORE;
    }

    let days_apart = (other.published_at - current.published_at).num_days().abs();
    if days_apart <= window_days {
        score += CLOSE_DATE_SCORE;
    }

    score
}

/// The `limit` posts most related to `current`, never including `current` itself.
pub fn related_posts(posts: &[Post], current: &Post, limit: usize, window_days: i64) -> Vec<Post> {
    let mut scored: Vec<(u32, &Post)> = posts.iter()
        .filter(|p| p.slug != current.slug)
        .map(|p| (relatedness(current, p, window_days), p))
        .collect();

    scored.sort_by(|(a, _), (b, _)| b.cmp(a));
    scored.into_iter()
        .take(limit)
        .map(|(_, p)| p.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::content::parsing_utils::parse_content;
    use crate::test_data::PostFixture;

    use super::*;

    fn post(slug: &str, fixture: PostFixture) -> Post {
        let record = parse_content(slug, &fixture.render()).unwrap();
        Post::from_record(slug, &record, 200).unwrap()
    }

    fn slugs<'a>(results: impl IntoIterator<Item=&'a Post>) -> Vec<&'a str> {
        results.into_iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_empty_keyword() {
        let posts = vec![post("a", PostFixture::new("Anything at all", "2024-01-01"))];
        assert!(search_posts(&posts, "").is_empty());
        assert!(search_posts(&posts, "   ").is_empty());
    }

    #[test]
    fn test_ranking() {
        let posts = vec![
            post("content-only", PostFixture::new("Nothing to see", "2024-01-01").body("A Zebra wandered in.")),
            post("tags-only", PostFixture::new("Nothing here either", "2024-01-01").tags(&["zebras", "stripes"])),
            post("excerpt-only", PostFixture::new("Still nothing", "2024-01-01").excerpt("All about the zebra.")),
            post("title", PostFixture::new("The ZEBRA guide", "2024-01-01")),
            post("no-match", PostFixture::new("Unrelated article", "2024-01-01")),
        ];

        let results = search_posts(&posts, "zebra");
        let order: Vec<&str> = results.iter().map(|r| r.post.slug.as_str()).collect();
        assert_eq!(order, ["title", "excerpt-only", "tags-only", "content-only"]);

        let scores: Vec<u32> = results.iter().map(|r| r.score).collect();
        assert_eq!(scores, [100, 50, 25, 10]);
        assert_eq!(results[2].matched_in, [MatchedField::Tags]);
    }

    #[test]
    fn test_scores_add_up() {
        let posts = vec![
            post("first", PostFixture::new("Telehealth basics", "2024-01-01").body("telehealth everywhere")),
            post("second", PostFixture::new("Telehealth deep dive", "2024-01-01")
                .excerpt("Telehealth explained")
                .tags(&["telehealth"])
                .body("More telehealth")),
        ];

        let results = search_posts(&posts, "Telehealth");
        assert_eq!(results[0].post.slug, "second");
        assert_eq!(results[0].score, 185);
        assert_eq!(results[0].matched_in, [MatchedField::Title, MatchedField::Excerpt, MatchedField::Content, MatchedField::Tags]);
        assert_eq!(results[1].score, 110);
    }

    #[test]
    fn test_ties_keep_order() {
        let posts = vec![
            post("b", PostFixture::new("Billing tips", "2024-01-01")),
            post("a", PostFixture::new("Billing mistakes", "2024-01-01")),
        ];
        let results = search_posts(&posts, "billing");
        assert_eq!(slugs(results.iter().map(|r| &r.post)), ["b", "a"]);
    }

    #[test]
    fn test_search_suggestions() {
        let posts = vec![
            post("a", PostFixture::new("Scheduling: Smarter Schedules", "2024-01-01").tags(&["Scheduling", "scripts"])),
            post("b", PostFixture::new("Sc is too short", "2024-01-01").tags(&["screening"])),
        ];

        assert_eq!(search_suggestions(&posts, "sc", 5), ["scheduling", "schedules", "scripts", "screening"]);
        assert_eq!(search_suggestions(&posts, "SC", 2), ["scheduling", "schedules"]);
        assert!(search_suggestions(&posts, "s", 5).is_empty());
        assert!(search_suggestions(&posts, "zz", 5).is_empty());
    }

    #[test]
    fn test_related_posts() {
        let current = post("current", PostFixture::new("Current post", "2024-03-01")
            .category("compliance")
            .tags(&["hipaa", "privacy"])
            .author("Mark Lee"));

        let posts = vec![
            current.clone(),
            post("far", PostFixture::new("Far away post", "2023-01-01").category("technology").tags(&["ai"]).author("Someone")),
            post("same-cat", PostFixture::new("Same category", "2023-01-01").category("compliance").tags(&["ai"]).author("Someone")),
            post("tags", PostFixture::new("Shared tags", "2023-01-01").category("technology").tags(&["HIPAA", "privacy"]).author("Someone")),
            post("close", PostFixture::new("Close in time", "2024-03-20").category("technology").tags(&["ai"]).author("Mark Lee")),
        ];

        assert_eq!(relatedness(&current, &posts[2], 30), 10);
        assert_eq!(relatedness(&current, &posts[3], 30), 10);
        assert_eq!(relatedness(&current, &posts[4], 30), 5);

        let related = related_posts(&posts, &current, 3, 30);
        assert_eq!(slugs(&related), ["same-cat", "tags", "close"]);
        assert!(related.iter().all(|p| p.slug != "current"));

        let all = related_posts(&posts, &current, 10, 30);
        assert_eq!(all.len(), 4);
        assert_eq!(all[3].slug, "far");
    }
}
