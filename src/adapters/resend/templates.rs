//! HTML email bodies
//!
//! Three templates: the internal new-order notification, the customer
//! order confirmation, and the advertiser performance report. Ad copy
//! supports `**bold**` and `[[linked text]]` markup; everything
//! customer-supplied is HTML-escaped before interpolation.

use crate::domain::ad::{AdType, BookingOrder, OrderItem};

/// Escape text for safe interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render ad copy markup: `**text**` becomes bold, `[[text]]` becomes a
/// link to `url` (or underlined text when there is no URL).
pub fn format_ad_copy(text: &str, url: &str) -> String {
    let escaped = escape_html(text);
    let bolded = replace_delimited(&escaped, "**", "**", |inner| {
        format!("<strong>{inner}</strong>")
    });
    replace_delimited(&bolded, "[[", "]]", |inner| {
        if url.is_empty() {
            format!("<span style=\"text-decoration:underline;\">{inner}</span>")
        } else {
            format!(
                "<a href=\"{}\" style=\"text-decoration:underline;\">{inner}</a>",
                escape_html(url)
            )
        }
    })
}

/// Replace each non-empty `open`...`close` span via `wrap`, leaving
/// unpaired delimiters untouched.
fn replace_delimited(
    text: &str,
    open: &str,
    close: &str,
    mut wrap: impl FnMut(&str) -> String,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        let after = &rest[start + open.len()..];
        match after.find(close) {
            Some(end) if end > 0 => {
                out.push_str(&rest[..start]);
                out.push_str(&wrap(&after[..end]));
                rest = &after[end + close.len()..];
            }
            _ => break,
        }
    }
    out.push_str(rest);
    out
}

fn type_label(ad_type: AdType) -> &'static str {
    match ad_type {
        AdType::Premium => "Premium Sponsorship",
        _ => "Unclassified Ad",
    }
}

fn item_block(item: &OrderItem) -> String {
    format!(
        r#"<div style="background:#f7f9fa;border-radius:8px;padding:16px;margin-bottom:12px;">
  <div style="margin-bottom:8px;">
    <span style="font-weight:700;">{label}</span>
    <span style="float:right;font-weight:700;">${price}</span>
  </div>
  <div style="font-size:14px;color:#666;margin-bottom:12px;">Issue #{issue} &middot; {date}</div>
  <div style="font-size:14px;line-height:1.5;">{copy}</div>
</div>"#,
        label = type_label(item.ad_type),
        price = item.price,
        issue = escape_html(&item.issue_number),
        date = escape_html(&item.date_formatted),
        copy = format_ad_copy(&item.ad_copy, &item.ad_url),
    )
}

fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1.0"></head>
<body style="margin:0;padding:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#f5f5f5;">
<div style="max-width:600px;margin:0 auto;padding:20px;">
{body}
</div>
</body>
</html>"#
    )
}

/// Internal notification sent to the team when an order completes
pub fn internal_notification(order: &BookingOrder, payment_intent: Option<&str>) -> String {
    let items: String = order.items.iter().map(|i| item_block(i)).collect();
    let company_row = if order.company.is_empty() {
        String::new()
    } else {
        format!(
            r#"<tr><td style="padding:4px 0;color:#666;">Company:</td><td style="padding:4px 0;">{}</td></tr>"#,
            escape_html(&order.company)
        )
    };
    let stripe_link = payment_intent
        .map(|pi| {
            format!(
                r#"<div style="margin-top:24px;text-align:center;">
  <a href="https://dashboard.stripe.com/payments/{pi}" style="display:inline-block;background:#181818;color:white;padding:12px 24px;border-radius:6px;text-decoration:none;font-weight:600;">View in Stripe</a>
</div>"#
            )
        })
        .unwrap_or_default();

    page(&format!(
        r#"<div style="background:#8fd14f;padding:20px;border-radius:8px 8px 0 0;">
  <h1 style="margin:0;color:#181818;font-size:24px;">New Ad Order!</h1>
  <p style="margin:8px 0 0;color:#181818;font-size:18px;font-weight:bold;">${total} received</p>
</div>
<div style="background:white;padding:24px;border-radius:0 0 8px 8px;">
  <h2 style="margin:0 0 16px;font-size:14px;text-transform:uppercase;color:#888;">Customer Details</h2>
  <table style="width:100%;margin-bottom:24px;">
    <tr><td style="padding:4px 0;color:#666;">Name:</td><td style="padding:4px 0;font-weight:600;">{name}</td></tr>
    <tr><td style="padding:4px 0;color:#666;">Email:</td><td style="padding:4px 0;">{email}</td></tr>
    {company_row}
  </table>
  <h2 style="margin:0 0 16px;font-size:14px;text-transform:uppercase;color:#888;">Ad Bookings</h2>
  {items}
  <div style="border-top:2px solid #181818;margin-top:20px;padding-top:16px;">
    <span style="font-weight:600;">Total Paid</span>
    <span style="float:right;font-weight:700;font-size:20px;">${total}</span>
  </div>
  {stripe_link}
</div>"#,
        total = order.total(),
        name = escape_html(&order.name),
        email = escape_html(&order.email),
    ))
}

/// Receipt-style confirmation sent to the customer
pub fn customer_confirmation(order: &BookingOrder, order_date: &str) -> String {
    let items: String = order.items.iter().map(|i| item_block(i)).collect();
    let company_row = if order.company.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div style="color:#666;">{}</div>"#,
            escape_html(&order.company)
        )
    };

    page(&format!(
        r#"<div style="text-align:center;padding:24px 0;">
  <h1 style="margin:0 0 8px;color:#181818;font-size:28px;">Order Confirmed!</h1>
  <p style="margin:0;color:#666;">Thanks for advertising with us</p>
</div>
<div style="background:white;border-radius:8px;padding:24px;margin-bottom:16px;">
  <div style="text-align:center;padding-bottom:16px;border-bottom:1px dashed #ddd;margin-bottom:16px;">
    <div style="font-size:12px;text-transform:uppercase;color:#888;">Order Receipt</div>
    <div style="font-size:14px;color:#666;">{order_date}</div>
  </div>
  <div style="margin-bottom:20px;padding-bottom:16px;border-bottom:1px dashed #ddd;">
    <div style="font-size:12px;text-transform:uppercase;color:#888;margin-bottom:8px;">Billed To</div>
    <div style="font-weight:600;">{name}</div>
    <div style="color:#666;">{email}</div>
    {company_row}
  </div>
  <div style="font-size:12px;text-transform:uppercase;color:#888;margin-bottom:12px;">Your Ad Bookings</div>
  {items}
  <div style="border-top:2px solid #181818;margin-top:8px;padding-top:16px;">
    <span style="font-weight:600;">Total Paid</span>
    <span style="float:right;font-weight:700;font-size:20px;">${total}</span>
  </div>
</div>
<div style="background:white;border-radius:8px;padding:24px;margin-bottom:16px;">
  <div style="font-size:12px;text-transform:uppercase;color:#888;margin-bottom:12px;">What Happens Next</div>
  <ul style="margin:0;padding-left:20px;color:#555;line-height:1.8;">
    <li>We'll review your ad copy to ensure it meets our guidelines.</li>
    <li>Your ad will be published on the scheduled date.</li>
    <li>You'll receive performance stats after your ad runs.</li>
  </ul>
</div>
<div style="text-align:center;padding:16px;color:#888;font-size:13px;">
  Questions? Just reply to this email.
</div>"#,
        name = escape_html(&order.name),
        email = escape_html(&order.email),
        total = order.total(),
    ))
}

/// Inputs for the advertiser performance report
#[derive(Debug, Clone, Default)]
pub struct ReportInput {
    pub customer_name: String,
    pub issue_number: String,
    pub date_formatted: String,
    pub ad_type: AdType,
    pub clicks: i64,
    pub open_rate: f64,
}

/// Performance report sent to the advertiser after their issue runs
pub fn performance_report(input: &ReportInput) -> String {
    page(&format!(
        r#"<div style="background:#8fd14f;padding:24px;border-radius:8px 8px 0 0;text-align:center;">
  <h1 style="margin:0;color:#181818;font-size:24px;">Your Ad Performance Report</h1>
  <p style="margin:8px 0 0;color:#181818;">Issue #{issue} &middot; {date}</p>
</div>
<div style="background:white;padding:32px;border-radius:0 0 8px 8px;">
  <p style="margin:0 0 24px;color:#555;font-size:16px;">Hi {name},</p>
  <p style="margin:0 0 24px;color:#555;font-size:16px;">Here are the results from your {label} in Issue #{issue}:</p>
  <div style="background:#f7f9fa;border-radius:12px;padding:24px;margin-bottom:24px;text-align:center;">
    <div style="display:inline-block;margin:0 20px;">
      <div style="font-size:48px;font-weight:700;color:#8fd14f;line-height:1;">{clicks}</div>
      <div style="font-size:14px;color:#666;margin-top:4px;">Link Clicks</div>
    </div>
    <div style="display:inline-block;margin:0 20px;">
      <div style="font-size:48px;font-weight:700;color:#181818;line-height:1;">{open_rate}%</div>
      <div style="font-size:14px;color:#666;margin-top:4px;">Open Rate</div>
    </div>
  </div>
  <p style="margin:0 0 24px;color:#555;font-size:16px;">Thank you for advertising with us! We hope you saw great results from your campaign.</p>
  <p style="margin:24px 0 0;color:#888;font-size:14px;text-align:center;">Questions? Just reply to this email.</p>
</div>"#,
        issue = escape_html(&input.issue_number),
        date = escape_html(&input.date_formatted),
        name = escape_html(&input.customer_name),
        label = type_label(input.ad_type),
        clicks = input.clicks,
        open_rate = input.open_rate,
    ))
}
