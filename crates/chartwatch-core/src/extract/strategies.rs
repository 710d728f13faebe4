//! Built-in extraction strategies for chart pages.
//!
//! Ordered from most to least structured. Each one only reads the HTML it is
//! given and returns unranked drafts; ranking and capping happen in
//! [`Extractor`](super::Extractor).

use once_cell::sync::Lazy;
use regex::Regex;

use super::html::{self, Element};
use super::{EntryDraft, ExtractionStrategy};

/// Row titles are cut to this many characters when read from plain text.
const ROW_TITLE_MAX_CHARS: usize = 50;
/// Singers read after a row's `-` are cut to this many characters.
const ROW_SINGER_MAX_CHARS: usize = 30;
/// Containers with more items than this are trusted as the song list.
const LIST_MIN_ITEMS: usize = 10;
/// Singer spans longer than this are treated as decoration, not a name.
const SINGER_MAX_CHARS: usize = 20;
const TEXT_LINE_MIN_CHARS: usize = 3;
const TEXT_LINE_MAX_CHARS: usize = 99;
const TEXT_TITLE_MAX_CHARS: usize = 40;

/// Text fragments that mark navigation/footer lines rather than songs.
const NOISE_KEYWORDS: &[&str] = &[
    "酷狗",
    "Copyright",
    "腾讯音乐",
    "商务合作",
    "VIP会员",
    "播放",
    "下载",
    "分享",
    "榜单",
    "热门",
    "全部",
];

static DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}(:\d{2})?$").expect("static regex"));
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s:.\-/|·]*$").expect("static regex"));
static LEADING_RANK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\s+").expect("static regex"));

/// Rows carrying a `data-index` attribute, one per chart position.
///
/// The title and link come from the first anchor whose text is longer than
/// one character and is not itself a URL. Without such an anchor the row's
/// first text line is used. The singer is the text after the row's first
/// `-`, up to the end of that line.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataIndexRows;

impl ExtractionStrategy for DataIndexRows {
    fn name(&self) -> &'static str {
        "data_index_rows"
    }

    fn extract(&self, page: &str) -> Vec<EntryDraft> {
        html::elements_with_attr(page, "data-index")
            .iter()
            .filter_map(data_index_row)
            .collect()
    }
}

fn data_index_row(row: &Element<'_>) -> Option<EntryDraft> {
    let lines = html::text_lines(row.inner);

    let anchor = row.descendants_by_tag("a").into_iter().find(|a| {
        let text = a.text();
        text.chars().count() > 1 && !text.contains("http") && !text.contains("www")
    });
    let (title, url) = match anchor {
        Some(a) => (a.text(), a.attr("href")),
        None => {
            let title = lines
                .iter()
                .find(|line| line.chars().count() > 1)
                .map(|line| line.chars().take(ROW_TITLE_MAX_CHARS).collect::<String>())
                .unwrap_or_default();
            (title, None)
        }
    };
    if title.chars().count() <= 1 {
        return None;
    }

    let text = lines.join("\n");
    let singer = text
        .split_once('-')
        .and_then(|(_, tail)| tail.trim().lines().next())
        .map(|line| line.trim().chars().take(ROW_SINGER_MAX_CHARS).collect::<String>())
        .filter(|singer| !singer.is_empty());

    Some(EntryDraft {
        title,
        singer,
        duration: None,
        url,
    })
}

/// Blocks tagged with the chart's `pc_temp_songname` class.
///
/// Title and link come from the first anchor (or the block itself when the
/// class sits on the anchor). The singer is the first short `<span>` whose
/// text differs from the title, else the text after the block's last `-`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SongNameBlocks;

impl ExtractionStrategy for SongNameBlocks {
    fn name(&self) -> &'static str {
        "song_name_blocks"
    }

    fn extract(&self, page: &str) -> Vec<EntryDraft> {
        html::elements_by_class(page, "pc_temp_songname")
            .iter()
            .filter_map(song_name_block)
            .collect()
    }
}

fn song_name_block(block: &Element<'_>) -> Option<EntryDraft> {
    let anchor = if block.name == "a" {
        Some(block.clone())
    } else {
        block.descendants_by_tag("a").into_iter().next()
    };
    let (title, url) = match &anchor {
        Some(a) => (a.text(), a.attr("href").unwrap_or_default()),
        None => (String::new(), String::new()),
    };
    if title.is_empty() {
        return None;
    }

    let singer = block
        .descendants_by_tag("span")
        .iter()
        .map(Element::text)
        .find(|text| {
            !text.is_empty()
                && *text != title
                && !text.contains('·')
                && text.chars().count() < SINGER_MAX_CHARS
        })
        .map(|text| text.trim_start_matches('-').trim().to_string())
        .filter(|text| !text.is_empty())
        .or_else(|| {
            block
                .text()
                .rsplit_once('-')
                .map(|(_, tail)| tail.trim().to_string())
                .filter(|tail| !tail.is_empty())
        });

    Some(EntryDraft {
        title,
        singer,
        duration: None,
        url: Some(url),
    })
}

/// `<li>` rows inside a recognised song-list container.
///
/// The first container (in `pc_temp_songlist`, `rank-list`, `song-list`
/// order) holding more than ten rows wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListItems;

const LIST_CONTAINERS: &[&str] = &["pc_temp_songlist", "rank-list", "song-list"];

impl ExtractionStrategy for ListItems {
    fn name(&self) -> &'static str {
        "list_items"
    }

    fn extract(&self, page: &str) -> Vec<EntryDraft> {
        for class in LIST_CONTAINERS {
            for container in html::elements_by_class(page, class) {
                let rows = container.descendants_by_tag("li");
                if rows.len() > LIST_MIN_ITEMS {
                    tracing::debug!(container = class, rows = rows.len(), "song list found");
                    return rows.iter().filter_map(list_row).collect();
                }
            }
        }
        Vec::new()
    }
}

fn list_row(row: &Element<'_>) -> Option<EntryDraft> {
    let anchors = row.descendants_by_tag("a");
    let title_el = anchors
        .iter()
        .find(|a| {
            a.attr("href")
                .map(|href| href.contains("song"))
                .unwrap_or(false)
                && !a.text().is_empty()
        })
        .cloned()
        .or_else(|| first_with_text(row, &["song-name", "name"]))
        .or_else(|| anchors.iter().find(|a| !a.text().is_empty()).cloned())?;

    let mut title = title_el.text();
    let url = title_el.attr("href");

    let mut singer = first_with_text(row, &["singer", "artist"])
        .map(|el| el.text())
        .or_else(|| {
            row.descendants_by_tag("span")
                .iter()
                .map(Element::text)
                .find(|text| {
                    !text.is_empty()
                        && *text != title
                        && !DURATION.is_match(text)
                        && !NON_WORD.is_match(text)
                })
        })
        .map(|text| text.trim_start_matches('-').trim().to_string())
        .filter(|text| !text.is_empty());

    if singer.is_none() {
        if let Some((head, tail)) = title.rsplit_once(" - ") {
            let (head, tail) = (head.trim().to_string(), tail.trim().to_string());
            if !head.is_empty() && !tail.is_empty() {
                title = head;
                singer = Some(tail);
            }
        }
    }

    let duration = first_with_text(row, &["duration", "time", "length"]).map(|el| el.text());

    Some(EntryDraft {
        title,
        singer,
        duration,
        url,
    })
}

fn first_with_text<'a>(row: &Element<'a>, classes: &[&str]) -> Option<Element<'a>> {
    classes.iter().find_map(|class| {
        row.descendants_by_class(class)
            .into_iter()
            .find(|el| !el.text().is_empty())
    })
}

/// Coarse fallback over the page's visible text lines.
///
/// Keeps lines of 3 to 99 characters that carry no navigation keyword and
/// are not bare numbers or times. A leading rank number is dropped,
/// `Title - Singer` lines are split on the last `-`, and titles end before
/// the first `(` and are cut to 40 characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLines;

impl ExtractionStrategy for TextLines {
    fn name(&self) -> &'static str {
        "text_lines"
    }

    fn extract(&self, page: &str) -> Vec<EntryDraft> {
        html::text_lines(page)
            .into_iter()
            .filter(|line| {
                let len = line.chars().count();
                (TEXT_LINE_MIN_CHARS..=TEXT_LINE_MAX_CHARS).contains(&len)
                    && !NOISE_KEYWORDS.iter().any(|keyword| line.contains(keyword))
                    && !NON_WORD.is_match(line)
            })
            .map(|line| text_line(&line))
            .collect()
    }
}

fn text_line(line: &str) -> EntryDraft {
    let line = LEADING_RANK.replace(line, "");
    let (title, singer) = match line.rsplit_once('-') {
        Some((head, tail)) if !head.trim().is_empty() && !tail.trim().is_empty() => {
            (head.trim(), Some(tail.trim().to_string()))
        }
        _ => (line.trim(), None),
    };
    let title = match title.find('(') {
        Some(paren) if paren > 0 => title[..paren].trim_end(),
        _ => title,
    };
    EntryDraft {
        title: title.chars().take(TEXT_TITLE_MAX_CHARS).collect(),
        singer,
        duration: None,
        url: None,
    }
}
