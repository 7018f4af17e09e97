//! Markup fragments for the detail page regions.

use super::listing::BoundedList;
use super::mentions::MentionTag;
use super::outcome::{classify_outcome, display_result};
use super::{BillItem, NewsItem, VideoItem};

/// Bills shown before the expand control.
pub const BILL_CAP: usize = 10;
/// News items shown before the expand control.
pub const NEWS_CAP: usize = 8;
/// Videos shown before the expand control.
pub const VIDEO_CAP: usize = 6;

const BILL_DETAIL_URL: &str = "https://likms.assembly.go.kr/bill/billDetail.do?billId=";

/// Markup replacing the loading indicator when the member document cannot be
/// fetched. No retry is attempted.
pub fn data_not_found_markup() -> &'static str {
    "<div class='py-20 text-slate-400 font-bold'>데이터를 찾을 수 없습니다.</div>"
}

pub fn render_bill_rows(bills: &BoundedList<BillItem>) -> String {
    bills.render_items(bill_row)
}

fn bill_row(bill: &BillItem) -> String {
    let raw = bill.proc_result.as_deref();
    let outcome = classify_outcome(raw);
    let link = format!(
        "{BILL_DETAIL_URL}{}",
        bill.bill_id.as_deref().unwrap_or_default()
    );
    let propose = bill
        .propose_dt
        .as_deref()
        .and_then(|d| d.get(0..10))
        .unwrap_or_default();
    format!(
        "<tr class=\"bill-row\" data-link=\"{link}\">\
         <td><span class=\"badge {badge}\">{result}</span></td>\
         <td class=\"bill-name\">{name}</td>\
         <td class=\"bill-date\">{propose}</td>\
         </tr>",
        badge = outcome.badge_class(),
        result = escape_html(display_result(raw)),
        name = escape_html(&bill.bill_name),
    )
}

pub fn render_news_list(news: &BoundedList<NewsItem>) -> String {
    news.render_items(news_item)
}

fn news_item(item: &NewsItem) -> String {
    format!(
        "<li class=\"news-item\"><a href=\"{link}\" target=\"_blank\">\
         <span class=\"news-press\">{press}</span>\
         <span class=\"news-date\">{date}</span>\
         <h4>{title}</h4></a></li>",
        link = item.link.as_deref().unwrap_or_default(),
        press = escape_html(item.press.as_deref().unwrap_or("Media")),
        date = item
            .pub_date
            .as_deref()
            .and_then(|d| d.get(0..10))
            .unwrap_or_default(),
        title = escape_html(&strip_tags(&item.title)),
    )
}

pub fn render_video_list(videos: &BoundedList<VideoItem>) -> String {
    videos.render_items(video_item)
}

fn video_item(video: &VideoItem) -> String {
    let thumbnail = youtube_video_id(&video.url)
        .map(|id| format!("https://img.youtube.com/vi/{id}/mqdefault.jpg"))
        .unwrap_or_default();
    format!(
        "<a href=\"{url}\" target=\"_blank\" class=\"video-item\">\
         <img src=\"{thumbnail}\" alt=\"\" />\
         <h4>{title}</h4><span class=\"video-channel\">{channel}</span></a>",
        url = video.url,
        title = escape_html(&video.title),
        channel = escape_html(video.channel.as_deref().unwrap_or("YouTube")),
    )
}

pub fn render_mention_tags(tags: &[MentionTag]) -> String {
    tags.iter()
        .map(|tag| {
            format!(
                "<a class=\"mention-tag {class}\" href=\"/details/{id}.html\">\
                 {id}<span class=\"mention-count\">{count}</span></a>",
                class = tag.emphasis.css_class(),
                id = tag.member_id,
                count = tag.count,
            )
        })
        .collect()
}

/// The video id from a watch URL, e.g. `...watch?v=abc123&t=1` -> `abc123`.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    let (_, after) = url.split_once("v=")?;
    let id = after.split('&').next().unwrap_or(after);
    (!id.is_empty()).then_some(id)
}

/// Removes markup fragments that upstream feeds embed in news titles.
pub fn strip_tags(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => output.push(ch),
            _ => {}
        }
    }
    output
}

fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }
    output
}
