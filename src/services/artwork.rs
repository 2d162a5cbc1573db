// Artwork classification and selection
//
// Takes the raw images response and partitions it into
// {landscape, portrait} x {language} buckets of resolved image URLs.
// Pipeline per bucket: classify -> dedupe -> rank -> truncate.

use std::collections::HashSet;

use crate::models::{ImageRecord, ImagesResponse};

/// An image is landscape at or above this aspect ratio.
const LANDSCAPE_MIN_RATIO: f64 = 1.7;

/// An image is portrait below this aspect ratio. Images in
/// `[PORTRAIT_MAX_RATIO, LANDSCAPE_MIN_RATIO)` land in neither bucket.
const PORTRAIT_MAX_RATIO: f64 = 1.0;

/// Orientation derived from an image's aspect ratio; never stored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Classify a record by its aspect ratio. Squarish images (ratio in
    /// `[1.0, 1.7)`) are excluded from both buckets.
    pub fn of(record: &ImageRecord) -> Option<Self> {
        if record.aspect_ratio >= LANDSCAPE_MIN_RATIO {
            Some(Orientation::Landscape)
        } else if record.aspect_ratio < PORTRAIT_MAX_RATIO {
            Some(Orientation::Portrait)
        } else {
            None
        }
    }
}

/// Image host size segments for different purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// w500 - poster sized for chat display
    PosterLarge,
    /// w1280 - large backdrop
    BackdropLarge,
    /// w300 - logo
    Logo,
    /// original - full size
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::PosterLarge => "w500",
            ImageSize::BackdropLarge => "w1280",
            ImageSize::Logo => "w300",
            ImageSize::Original => "original",
        }
    }
}

/// Tuning knobs for the selector. `Default` matches the observed bot
/// behavior: English primary with a Hindi secondary bucket, 10 images per
/// bucket, 5 logos.
#[derive(Debug, Clone)]
pub struct SelectorOptions {
    /// Primary language bucket; language-neutral records are eligible here.
    pub primary_language: String,

    /// Secondary language buckets, exact tag match only.
    pub extra_languages: Vec<String>,

    /// Maximum records per {orientation, language} bucket.
    pub bucket_cap: usize,

    /// Maximum logos returned.
    pub logo_cap: usize,

    /// Records with `vote_average` at or above this are promoted.
    pub promote_threshold: f64,

    /// Maximum records in the promoted tier of a bucket.
    pub promoted_cap: usize,

    /// Size segment used when resolving URLs.
    pub image_size: ImageSize,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            primary_language: "en".to_string(),
            extra_languages: vec!["hi".to_string()],
            bucket_cap: 10,
            logo_cap: 5,
            promote_threshold: 5.0,
            promoted_cap: 3,
            image_size: ImageSize::Original,
        }
    }
}

/// Landscape and portrait URLs for one language bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageArtwork {
    pub language: String,
    pub landscape: Vec<String>,
    pub portrait: Vec<String>,
}

/// Selector output: one bucket per configured language (primary first),
/// plus logos. Plain data, no platform types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtworkSet {
    pub languages: Vec<LanguageArtwork>,
    pub logos: Vec<String>,
}

impl ArtworkSet {
    /// The all-empty structure of the configured shape. Returned whenever the
    /// upstream fetch did not succeed; the selector never fails the caller.
    pub fn empty(options: &SelectorOptions) -> Self {
        let languages = std::iter::once(&options.primary_language)
            .chain(options.extra_languages.iter())
            .map(|language| LanguageArtwork {
                language: language.clone(),
                ..Default::default()
            })
            .collect();
        Self {
            languages,
            logos: Vec::new(),
        }
    }

    /// Look up a language bucket by tag.
    pub fn language(&self, tag: &str) -> Option<&LanguageArtwork> {
        self.languages.iter().find(|l| l.language == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.logos.is_empty()
            && self
                .languages
                .iter()
                .all(|l| l.landscape.is_empty() && l.portrait.is_empty())
    }
}

/// Partition an images response into language/orientation buckets of
/// resolved URLs.
///
/// Backdrops and posters are classified together by aspect ratio, not by
/// which array they arrived in. A record with no language tag is
/// language-neutral: it is eligible for the primary bucket but never for a
/// secondary one. Logos skip orientation classification and keep the
/// primary-or-neutral records only.
pub fn select_artwork(
    images: &ImagesResponse,
    image_base: &str,
    options: &SelectorOptions,
) -> ArtworkSet {
    let mut set = ArtworkSet::empty(options);

    let candidates: Vec<&ImageRecord> = images
        .backdrops
        .iter()
        .chain(images.posters.iter())
        .collect();

    for bucket in &mut set.languages {
        let neutral_ok = bucket.language == options.primary_language;
        for orientation in [Orientation::Landscape, Orientation::Portrait] {
            let matched = candidates.iter().copied().filter(|record| {
                Orientation::of(record) == Some(orientation)
                    && matches_language(record, &bucket.language, neutral_ok)
            });
            let urls = pick(matched, image_base, options.bucket_cap, options);
            match orientation {
                Orientation::Landscape => bucket.landscape = urls,
                Orientation::Portrait => bucket.portrait = urls,
            }
        }
    }

    // Logos: primary language or neutral, no orientation rule
    let logos = images
        .logos
        .iter()
        .filter(|record| matches_language(record, &options.primary_language, true));
    set.logos = pick(logos, image_base, options.logo_cap, options);

    set
}

/// Language rule: exact tag match, or no tag at all when the bucket admits
/// neutral records.
fn matches_language(record: &ImageRecord, language: &str, neutral_ok: bool) -> bool {
    match record.iso_639_1.as_deref() {
        Some(tag) => tag == language,
        None => neutral_ok,
    }
}

/// Dedupe, rank and truncate one bucket's candidates into resolved URLs.
///
/// Duplicate URLs collapse to their first occurrence. Records scoring at or
/// above the promote threshold form a promoted tier capped at
/// `promoted_cap`; the rest fill the remaining slots up to `cap`. Each tier
/// is ordered by descending vote average, stable, so unscored responses keep
/// their original order.
fn pick<'a>(
    records: impl Iterator<Item = &'a ImageRecord>,
    image_base: &str,
    cap: usize,
    options: &SelectorOptions,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<(&ImageRecord, String)> = Vec::new();
    for record in records {
        let url = resolve_url(image_base, options.image_size, &record.file_path);
        if seen.insert(url.clone()) {
            unique.push((record, url));
        }
    }

    let (mut promoted, mut rest): (Vec<_>, Vec<_>) = unique
        .into_iter()
        .partition(|(record, _)| record.vote_average >= options.promote_threshold);

    let by_score_desc = |a: &(&ImageRecord, String), b: &(&ImageRecord, String)| {
        b.0.vote_average
            .partial_cmp(&a.0.vote_average)
            .unwrap_or(std::cmp::Ordering::Equal)
    };
    promoted.sort_by(by_score_desc);
    rest.sort_by(by_score_desc);

    promoted.truncate(options.promoted_cap);

    let mut urls: Vec<String> = promoted.into_iter().map(|(_, url)| url).collect();
    for (_, url) in rest {
        if urls.len() >= cap {
            break;
        }
        urls.push(url);
    }
    urls.truncate(cap);
    urls
}

/// Compose a fetchable image URL: base host + size segment + file path.
pub fn resolve_url(image_base: &str, size: ImageSize, file_path: &str) -> String {
    format!(
        "{}/{}{}",
        image_base.trim_end_matches('/'),
        size.as_str(),
        file_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://image.tmdb.org/t/p";

    fn record(file_path: &str, lang: Option<&str>, ratio: f64, score: f64) -> ImageRecord {
        ImageRecord {
            file_path: file_path.to_string(),
            iso_639_1: lang.map(str::to_string),
            aspect_ratio: ratio,
            vote_average: score,
        }
    }

    fn url(file_path: &str) -> String {
        format!("{BASE}/original{file_path}")
    }

    #[test]
    fn test_image_size_str() {
        assert_eq!(ImageSize::PosterLarge.as_str(), "w500");
        assert_eq!(ImageSize::BackdropLarge.as_str(), "w1280");
        assert_eq!(ImageSize::Original.as_str(), "original");
    }

    #[test]
    fn test_orientation_rule() {
        assert_eq!(
            Orientation::of(&record("/a.jpg", None, 1.78, 0.0)),
            Some(Orientation::Landscape)
        );
        assert_eq!(
            Orientation::of(&record("/a.jpg", None, 1.7, 0.0)),
            Some(Orientation::Landscape)
        );
        assert_eq!(
            Orientation::of(&record("/a.jpg", None, 0.67, 0.0)),
            Some(Orientation::Portrait)
        );
        // No catch-all bucket for squarish images
        assert_eq!(Orientation::of(&record("/a.jpg", None, 1.0, 0.0)), None);
        assert_eq!(Orientation::of(&record("/a.jpg", None, 1.5, 0.0)), None);
    }

    #[test]
    fn test_buckets_by_language_and_orientation() {
        let images = ImagesResponse {
            backdrops: vec![
                record("/a.jpg", Some("en"), 1.78, 0.0),
                record("/b.jpg", Some("hi"), 1.78, 0.0),
            ],
            posters: vec![record("/c.jpg", Some("en"), 0.67, 0.0)],
            logos: vec![],
        };
        let set = select_artwork(&images, BASE, &SelectorOptions::default());

        let english = set.language("en").unwrap();
        let hindi = set.language("hi").unwrap();
        assert_eq!(english.landscape, vec![url("/a.jpg")]);
        assert_eq!(english.portrait, vec![url("/c.jpg")]);
        assert_eq!(hindi.landscape, vec![url("/b.jpg")]);
        assert!(hindi.portrait.is_empty());
    }

    #[test]
    fn test_neutral_goes_to_primary_only() {
        let images = ImagesResponse {
            backdrops: vec![record("/neutral.jpg", None, 1.78, 0.0)],
            ..Default::default()
        };
        let set = select_artwork(&images, BASE, &SelectorOptions::default());

        assert_eq!(
            set.language("en").unwrap().landscape,
            vec![url("/neutral.jpg")]
        );
        assert!(set.language("hi").unwrap().landscape.is_empty());
    }

    #[test]
    fn test_duplicates_collapse_to_first_occurrence() {
        let images = ImagesResponse {
            backdrops: vec![
                record("/a.jpg", Some("en"), 1.78, 0.0),
                record("/b.jpg", Some("en"), 1.78, 0.0),
                record("/a.jpg", Some("en"), 1.78, 0.0),
            ],
            ..Default::default()
        };
        let set = select_artwork(&images, BASE, &SelectorOptions::default());

        assert_eq!(
            set.language("en").unwrap().landscape,
            vec![url("/a.jpg"), url("/b.jpg")]
        );
    }

    #[test]
    fn test_bucket_cap_is_enforced() {
        let backdrops = (0..25)
            .map(|i| record(&format!("/{i}.jpg"), Some("en"), 1.78, 0.0))
            .collect();
        let images = ImagesResponse {
            backdrops,
            ..Default::default()
        };
        let options = SelectorOptions::default();
        let set = select_artwork(&images, BASE, &options);

        let landscape = &set.language("en").unwrap().landscape;
        assert_eq!(landscape.len(), options.bucket_cap);
        // Excess is dropped, not reordered
        assert_eq!(landscape[0], url("/0.jpg"));
        assert_eq!(landscape[9], url("/9.jpg"));
    }

    #[test]
    fn test_promoted_tier_ranks_ahead_with_cap() {
        // Four scored above threshold, promoted tier keeps the best three;
        // the rest follow in response order.
        let mut backdrops: Vec<ImageRecord> = (0..8)
            .map(|i| record(&format!("/plain{i}.jpg"), Some("en"), 1.78, 0.0))
            .collect();
        backdrops.insert(2, record("/good1.jpg", Some("en"), 1.78, 6.0));
        backdrops.insert(5, record("/good2.jpg", Some("en"), 1.78, 8.0));
        backdrops.insert(7, record("/good3.jpg", Some("en"), 1.78, 7.0));
        backdrops.push(record("/good4.jpg", Some("en"), 1.78, 5.5));

        let images = ImagesResponse {
            backdrops,
            ..Default::default()
        };
        let set = select_artwork(&images, BASE, &SelectorOptions::default());
        let landscape = &set.language("en").unwrap().landscape;

        assert_eq!(landscape.len(), 10);
        // Promoted tier: descending score, capped at 3
        assert_eq!(landscape[0], url("/good2.jpg"));
        assert_eq!(landscape[1], url("/good3.jpg"));
        assert_eq!(landscape[2], url("/good1.jpg"));
        // Remainder keeps response order
        assert_eq!(landscape[3], url("/plain0.jpg"));
        assert!(!landscape.contains(&url("/good4.jpg")));
    }

    #[test]
    fn test_logos_primary_or_neutral_capped() {
        let logos = vec![
            record("/l-en.png", Some("en"), 1.3, 0.0),
            record("/l-neutral.png", None, 1.3, 0.0),
            record("/l-hi.png", Some("hi"), 1.3, 0.0),
            record("/l2.png", Some("en"), 1.3, 0.0),
            record("/l3.png", Some("en"), 1.3, 0.0),
            record("/l4.png", Some("en"), 1.3, 0.0),
            record("/l5.png", Some("en"), 1.3, 0.0),
        ];
        let images = ImagesResponse {
            logos,
            ..Default::default()
        };
        let options = SelectorOptions::default();
        let set = select_artwork(&images, BASE, &options);

        assert_eq!(set.logos.len(), options.logo_cap);
        assert_eq!(set.logos[0], url("/l-en.png"));
        assert_eq!(set.logos[1], url("/l-neutral.png"));
        assert!(!set.logos.contains(&url("/l-hi.png")));
    }

    #[test]
    fn test_empty_shape_matches_configuration() {
        let options = SelectorOptions::default();
        let set = ArtworkSet::empty(&options);

        assert!(set.is_empty());
        assert_eq!(set.languages.len(), 2);
        assert_eq!(set.languages[0].language, "en");
        assert_eq!(set.languages[1].language, "hi");
        // A default response selects to the same shape
        assert_eq!(
            select_artwork(&ImagesResponse::default(), BASE, &options),
            set
        );
    }

    #[test]
    fn test_resolve_url_composition() {
        assert_eq!(
            resolve_url("https://image.tmdb.org/t/p/", ImageSize::PosterLarge, "/x.jpg"),
            "https://image.tmdb.org/t/p/w500/x.jpg"
        );
    }
}
