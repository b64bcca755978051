//! Catalog data types.
//!
//! Both maps keep insertion order, and serialize as JSON objects in that order:
//! `{ "<course title>": { "<chapter slug>": "<chapter url>" } }`.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A chapter of a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Last path segment of the chapter URL.
    pub slug: String,
    pub url: String,
}

/// Ordered chapter slug -> chapter URL mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterMap {
    chapters: Vec<Chapter>,
}

impl ChapterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a chapter. A repeated slug replaces the URL but keeps its first position.
    pub fn insert(&mut self, slug: impl Into<String>, url: impl Into<String>) {
        let slug = slug.into();
        let url = url.into();

        match self.chapters.iter_mut().find(|c| c.slug == slug) {
            Some(existing) => existing.url = url,
            None => self.chapters.push(Chapter { slug, url }),
        }
    }

    pub fn get(&self, slug: &str) -> Option<&str> {
        self.chapters
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| c.url.as_str())
    }

    pub fn retain(&mut self, f: impl FnMut(&Chapter) -> bool) {
        self.chapters.retain(f);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chapter> {
        self.chapters.iter()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChapterMap {
    type Item = &'a Chapter;
    type IntoIter = std::slice::Iter<'a, Chapter>;

    fn into_iter(self) -> Self::IntoIter {
        self.chapters.iter()
    }
}

/// A course and its chapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub title: String,
    pub chapters: ChapterMap,
}

/// Ordered course title -> chapters mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a course. A repeated title replaces the chapters but keeps its first position.
    pub fn insert(&mut self, title: impl Into<String>, chapters: ChapterMap) {
        let title = title.into();

        match self.courses.iter_mut().find(|c| c.title == title) {
            Some(existing) => existing.chapters = chapters,
            None => self.courses.push(Course { title, chapters }),
        }
    }

    pub fn get(&self, title: &str) -> Option<&ChapterMap> {
        self.courses
            .iter()
            .find(|c| c.title == title)
            .map(|c| &c.chapters)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.get(title).is_some()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.courses.iter().map(|c| c.title.as_str()).collect()
    }

    pub fn retain(&mut self, f: impl FnMut(&Course) -> bool) {
        self.courses.retain(f);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.courses.iter()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.iter()
    }
}

impl Serialize for ChapterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.chapters.len()))?;
        for chapter in &self.chapters {
            map.serialize_entry(&chapter.slug, &chapter.url)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ChapterMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChapterMapVisitor;

        impl<'de> Visitor<'de> for ChapterMapVisitor {
            type Value = ChapterMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of chapter slugs to chapter URLs, or an empty list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut chapters = ChapterMap::new();
                while let Some((slug, url)) = access.next_entry::<String, String>()? {
                    chapters.insert(slug, url);
                }
                Ok(chapters)
            }

            // Blueprints written by older tools store a course without chapters as `[]`.
            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                if access.next_element::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(1, &"an empty list"));
                }
                Ok(ChapterMap::new())
            }
        }

        deserializer.deserialize_any(ChapterMapVisitor)
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.courses.len()))?;
        for course in &self.courses {
            map.serialize_entry(&course.title, &course.chapters)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of course titles to chapter maps")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut catalog = Catalog::new();
                while let Some((title, chapters)) = access.next_entry::<String, ChapterMap>()? {
                    catalog.insert(title, chapters);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
