//! Fixed 20-song dataset substituted when a live capture is unusable.

use crate::model::entry::Entry;

const BASELINE: &[(&str, &str, &str)] = &[
    ("孤勇者", "陈奕迅", "03:45"),
    ("光年之外", "G.E.M.邓紫棋", "03:55"),
    ("起风了", "买辣椒也用券", "04:12"),
    ("星辰大海", "黄霄雲", "03:48"),
    ("少年", "梦然", "03:55"),
    ("错位时空", "艾辰", "04:02"),
    ("漠河舞厅", "柳爽", "05:34"),
    ("如愿", "王菲", "04:18"),
    ("这世界那么多人", "莫文蔚", "04:45"),
    ("海底", "一支榴莲", "03:15"),
    ("白月光与朱砂痣", "大籽", "03:24"),
    ("四季予你", "程响", "04:02"),
    ("千千万万", "深海鱼子酱", "03:38"),
    ("踏山河", "是七叔呢", "03:15"),
    ("云与海", "阿YueYue", "04:12"),
    ("执迷不悟", "小乐哥", "03:48"),
    ("失控", "井胧", "03:55"),
    ("嘉宾", "张远", "04:22"),
    ("奔赴星空", "尹昔眠", "03:28"),
    ("时光背面的我", "刘至佳/韩瞳", "03:15"),
];

/// The baseline chart, ranked 1..=20. Identical on every call.
pub fn baseline_entries() -> Vec<Entry> {
    BASELINE
        .iter()
        .zip(1u32..)
        .map(|((title, singer, duration), rank)| {
            Entry::new(rank, *title, *singer).with_duration(*duration)
        })
        .collect()
}
