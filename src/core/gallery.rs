// RosterPress - core/gallery.rs
//
// Static HTML gallery rendering. Core layer: pure string building over
// pre-resolved cards; avatar staging and file writes happen in the app
// layer. The page is self-contained (inline styles, no external scripts)
// so it can be dropped onto any static host as-is.

use crate::core::handle::{extract_handle, extract_instagram_handle};
use crate::core::model::Row;
use crate::util::constants::{
    COL_COMMENT, COL_DESCRIPTION, COL_FEATURE, COL_ICON, COL_LOCATION, COL_NAME, COL_OCCUPATION,
    COL_SNS_LINKS, COL_X_URL, MAX_CARD_LINKS, MAX_LINK_LABEL, OFFICIAL_URL, PROMO_DOMAIN,
    SORT_LAST_NAMES,
};

// ============================================================================
// Ordering
// ============================================================================

/// True when the row offers any way to find an avatar: an explicit icon
/// value, a derivable X handle, or an Instagram handle in the links column.
pub fn has_icon_identity(row: &Row) -> bool {
    !row.get(COL_ICON).trim().is_empty()
        || !extract_handle(row.get(COL_X_URL)).is_empty()
        || extract_instagram_handle(row.get(COL_SNS_LINKS)).is_some()
}

/// Orders published rows for display.
///
/// Composite key: deny-listed display names always sort last, then rows
/// without any icon identity sort after rows with one, and ties keep the
/// source order.
pub fn order_for_display<'a>(rows: &[&'a Row]) -> Vec<&'a Row> {
    let mut keyed: Vec<(usize, &Row)> = rows.iter().copied().enumerate().collect();
    keyed.sort_by_key(|(index, row)| {
        let denied = SORT_LAST_NAMES.contains(&row.get(COL_NAME).trim());
        (denied, !has_icon_identity(row), *index)
    });
    keyed.into_iter().map(|(_, row)| row).collect()
}

// ============================================================================
// Cards
// ============================================================================

/// One gallery entry: the source row plus its resolved avatar sources,
/// already ordered best-first and capped by the app layer.
pub struct Card<'a> {
    pub row: &'a Row,
    pub avatar_sources: Vec<String>,
}

// ============================================================================
// Rendering
// ============================================================================

const STYLE: &str = r#"
    :root { --bg:#0f172a; --card:#111827; --text:#e5e7eb; --muted:#9ca3af; --accent:#22d3ee; }
    body { margin:0; font-family: system-ui, -apple-system, Segoe UI, Roboto, Noto Sans JP, sans-serif; background:var(--bg); color:var(--text); }
    header { padding:24px 16px; text-align:center; }
    header h1 { margin:0 0 8px; font-size:28px; }
    header p { margin:0; color:var(--muted); }
    .cta { margin-top:12px; }
    .btn { display:inline-block; padding:8px 14px; border-radius:999px; border:1px solid rgba(255,255,255,0.12); color:#0b1220; background:#22d3ee; text-decoration:none; font-weight:600; }
    .btn:hover { filter: brightness(1.05); }
    .container { max-width:1100px; margin:0 auto; padding:16px; }
    .grid { display:grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap:16px; }
    .card { background:linear-gradient(180deg, rgba(255,255,255,0.04), rgba(255,255,255,0.02)); border:1px solid rgba(255,255,255,0.08); border-radius:12px; padding:14px; }
    .avatar { width:72px; height:72px; border-radius:50%; object-fit:cover; border:2px solid rgba(255,255,255,0.1); background:#222; }
    .row { display:flex; gap:12px; align-items:center; }
    .name { font-size:18px; font-weight:700; }
    .feature { color:var(--accent); font-size:14px; margin-top:2px; }
    .meta { color:var(--muted); font-size:13px; margin-top:8px; word-break: break-word; overflow-wrap: anywhere; }
    .desc { font-size:14px; line-height:1.6; margin-top:8px; color:#d1d5db; word-break: break-word; overflow-wrap: anywhere; }
    .links { display:flex; gap:10px; margin-top:10px; flex-wrap: wrap; }
    .link { color:#93c5fd; text-decoration:none; font-size:13px; }
    .link.promo { color:#f0abfc; font-weight:600; }
    footer { text-align:center; color:var(--muted); padding:24px; font-size:13px; }
    @media (max-width: 640px) {
      .container { padding: 12px; }
      .grid { grid-template-columns: 1fr; gap: 12px; }
      .card { padding: 12px; }
      .avatar { width: 64px; height: 64px; }
      .name { font-size: 17px; }
      .feature { font-size: 13px; }
    }
"#;

/// Renders the complete gallery page for the given cards.
///
/// Cards are emitted in slice order; callers sort with [`order_for_display`]
/// first. An empty slice renders a placeholder message instead of the grid.
pub fn render_gallery(cards: &[Card<'_>]) -> String {
    let mut page = String::with_capacity(8 * 1024);

    page.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>バイブコーディングキャンプ 参加者名簿</title>
  <style>{STYLE}  </style>
  <meta name="robots" content="noindex" />
  <!-- 共有時のみ index へ変更 -->
</head>
<body>
  <header>
    <h1>バイブコーディングキャンプ 参加者名簿</h1>
    <p>Discordで自己紹介いただいた方のみ表示しています。</p>
    <div class="cta"><a class="btn" target="_blank" rel="noopener" href="{OFFICIAL_URL}">公式サイトへ</a></div>
  </header>
  <div class="container">
"#
    ));

    if cards.is_empty() {
        page.push_str(
            "<p style='color:#9ca3af;text-align:center'>公開可否を true に設定するとカードが表示されます。</p>\n",
        );
    } else {
        page.push_str("<div class=grid>\n");
        for card in cards {
            render_card(&mut page, card);
        }
        page.push_str("</div>\n");
    }

    page.push_str("</div>\n");
    page.push_str("<footer>Generated by rosterpress</footer>\n");
    page.push_str("</body></html>");
    page
}

fn render_card(page: &mut String, card: &Card<'_>) {
    let row = card.row;
    let name = escape_html(row.get(COL_NAME));
    let feature = escape_html(row.get(COL_FEATURE));
    let location = escape_html(row.get(COL_LOCATION));
    let occupation = escape_html(row.get(COL_OCCUPATION));
    let description = {
        let primary = row.get(COL_DESCRIPTION);
        if primary.is_empty() {
            escape_html(row.get(COL_COMMENT))
        } else {
            escape_html(primary)
        }
    };
    let x_url = row.get(COL_X_URL).trim();

    page.push_str("  <div class=card>\n");
    page.push_str("    <div class=row>\n");
    if let Some(avatar) = render_avatar(card, &name, x_url) {
        page.push_str(&avatar);
    }
    page.push_str("      <div>\n");
    page.push_str(&format!("        <div class=name>{name}</div>\n"));
    if !feature.is_empty() {
        page.push_str(&format!("        <div class=feature>{feature}</div>\n"));
    }
    page.push_str("      </div>\n");
    page.push_str("    </div>\n");

    if !description.is_empty() {
        page.push_str(&format!("    <div class=desc>{description}</div>\n"));
    }
    if !location.is_empty() || !occupation.is_empty() {
        let meta = [location.as_str(), occupation.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ・ ");
        page.push_str(&format!("    <div class=meta>{meta}</div>\n"));
    }

    render_links(page, x_url, row.get(COL_SNS_LINKS));
    page.push_str("  </div>\n");
}

/// Builds the avatar `<img>` with its client-side fallback chain, wrapped in
/// a profile link when the row has an X URL. Returns `None` when the card
/// has no avatar source at all.
fn render_avatar(card: &Card<'_>, escaped_name: &str, x_url: &str) -> Option<String> {
    let mut sources = card.avatar_sources.iter();
    let first = sources.next()?;

    // The image element retries through up to two fallback sources before
    // giving up, stepping `dataset.step` so each candidate is tried once.
    let mut onerror_parts = Vec::new();
    if let Some(second) = sources.next() {
        onerror_parts.push(format!(
            "if(!this.dataset.step){{this.dataset.step='1';this.src='{second}';return;}}"
        ));
    }
    if let Some(third) = sources.next() {
        onerror_parts.push(format!(
            "if(this.dataset.step==='1'){{this.dataset.step='2';this.src='{third}';return;}}"
        ));
    }
    onerror_parts.push("this.onerror=null".to_string());
    let onerror = escape_html(&onerror_parts.join(" "));

    let img = format!(
        "<img class=avatar src=\"{}\" alt=\"{escaped_name}\" loading=\"lazy\" decoding=\"async\" referrerpolicy=\"no-referrer\" onerror=\"{onerror}\" />",
        escape_html(first)
    );

    let avatar = if x_url.is_empty() {
        format!("      {img}\n")
    } else {
        format!(
            "      <a target=\"_blank\" rel=\"noopener\" href=\"{}\">{img}</a>\n",
            escape_html(x_url)
        )
    };
    Some(avatar)
}

fn render_links(page: &mut String, x_url: &str, sns_cell: &str) {
    let mut links: Vec<(String, String, bool)> = Vec::new();
    if !x_url.is_empty() {
        links.push(("X".to_string(), x_url.to_string(), false));
    }
    for link in sns_cell.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if link.contains(PROMO_DOMAIN) {
            links.push((PROMO_DOMAIN.to_string(), link.to_string(), true));
        } else {
            let label: String = link
                .split("//")
                .last()
                .unwrap_or(link)
                .chars()
                .take(MAX_LINK_LABEL)
                .collect();
            links.push((label, link.to_string(), false));
        }
    }
    if links.is_empty() {
        return;
    }

    page.push_str("    <div class=links>\n");
    for (label, url, promo) in links.into_iter().take(MAX_CARD_LINKS) {
        let class = if promo { "\"link promo\"" } else { "link" };
        page.push_str(&format!(
            "      <a class={class} target=_blank rel=noopener href=\"{}\">{}</a>\n",
            escape_html(&url),
            escape_html(&label)
        ));
    }
    page.push_str("    </div>\n");
}

// ============================================================================
// Escaping
// ============================================================================

/// Escapes text for embedding in HTML content or double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// ============================================================================
// Tests
// ============================================================================
