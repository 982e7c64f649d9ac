mod common;

use chrono::NaiveDate;
use common::pdf_assertions::{link_uris, references_font};
use common::{GeneratedPdf, TestResult};
use percent_encoding::percent_decode_str;
use std::time::Duration;
use tally::{
    LineItem, Money, Quotation, QuotationRenderer, QuotationRequest, QuoteError, TempStore, Theme,
};
use tally_layout::LayoutError;

fn jane() -> QuotationRequest {
    QuotationRequest::new("jane@example.com", "12 Oak St", "90210")
}

fn renderer_in(dir: &std::path::Path) -> QuotationRenderer {
    QuotationRenderer::new(TempStore::new(dir))
}

fn fixed_quotation(renderer: &QuotationRenderer, request: &QuotationRequest) -> Quotation {
    let mut quotation = renderer.quotation_for(request);
    quotation.issued_on = NaiveDate::from_ymd_opt(2025, 11, 7).unwrap();
    quotation
}

fn modified(path: &std::path::Path) -> std::time::SystemTime {
    std::fs::metadata(path).unwrap().modified().unwrap()
}

#[tokio::test]
async fn end_to_end_example() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = renderer_in(dir.path()).render(&jane()).await?;

    let name = path.file_name().unwrap().to_str().unwrap();
    let stamp = name
        .strip_prefix("quotation-")
        .and_then(|rest| rest.strip_suffix(".pdf"))
        .expect("file name follows the quotation-<millis>.pdf convention");
    assert!(!stamp.is_empty() && stamp.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(path.parent(), Some(dir.path()));
    assert!(std::fs::metadata(&path)?.len() > 0);

    let pdf = GeneratedPdf::from_file(&path)?;
    let text = pdf.text();
    for needle in ["jane@example.com", "12 Oak St", "90210", "$150.00"] {
        assert!(text.contains(needle), "missing {needle:?} in:\n{text}");
    }
    Ok(())
}

#[tokio::test]
async fn same_input_gives_new_file_and_same_content() -> TestResult {
    let dir = tempfile::tempdir()?;
    let renderer = renderer_in(dir.path());
    let first = renderer.render(&jane()).await?;
    let second = renderer.render(&jane()).await?;
    assert_ne!(first, second);

    let a = GeneratedPdf::from_bytes(renderer.render_to_bytes(&fixed_quotation(&renderer, &jane()))?)?;
    let b = GeneratedPdf::from_bytes(renderer.render_to_bytes(&fixed_quotation(&renderer, &jane()))?)?;
    assert_eq!(a.text(), b.text());
    assert_eq!(a.page_count(), b.page_count());
    assert!(a.text().contains("November 7, 2025"));
    Ok(())
}

#[test]
fn total_is_sum_of_injected_items() -> TestResult {
    let dir = tempfile::tempdir()?;
    let items = vec![
        LineItem::new("Windows", "Inside and out", Money::from_cents(4_550)),
        LineItem::new("Oven", "Degrease", Money::from_dollars(35)),
        LineItem::new("Fridge", "Empty and wipe", Money::from_cents(1_999)),
    ];
    let expected: Money = items.iter().map(|i| i.price).sum();
    let renderer = renderer_in(dir.path()).with_catalog(items);

    let pdf = GeneratedPdf::from_bytes(renderer.render_to_bytes(&fixed_quotation(&renderer, &jane()))?)?;
    let text = pdf.text();
    assert_eq!(expected.to_string(), "$100.49");
    assert!(text.contains("$100.49"));
    assert!(!text.contains("$150.00"));
    Ok(())
}

#[tokio::test]
async fn link_carries_the_exact_email() -> TestResult {
    let dir = tempfile::tempdir()?;
    let renderer = renderer_in(dir.path());
    for email in ["jane@example.com", "jane+quotes@example.com", "50%off@example.com", "j\u{f6}rg@m\u{fc}ller.de"] {
        let request = QuotationRequest::new(email, "12 Oak St", "90210");
        let path = renderer.render(&request).await?;
        let pdf = GeneratedPdf::from_file(&path)?;

        let uris = link_uris(&pdf.doc);
        assert_eq!(uris.len(), 1, "one link for {email}");
        let (base, query) = uris[0].split_once("?email=").unwrap();
        assert_eq!(base, "http://localhost:8080/quotation");
        assert_eq!(percent_decode_str(query).decode_utf8()?, email);
    }
    Ok(())
}

#[tokio::test]
async fn sweep_is_idempotent() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = TempStore::new(dir.path());
    let old = store.write(b"%PDF-old").await?;
    store.write(b"%PDF-other").await?;
    let later = modified(&old) + Duration::from_secs(2 * 60 * 60);

    let first = store.sweep_expired_at(later);
    assert_eq!((first.scanned, first.deleted, first.failed), (2, 2, 0));
    let after_first: Vec<_> = std::fs::read_dir(dir.path())?.collect();

    let second = store.sweep_expired_at(later);
    assert_eq!((second.scanned, second.deleted, second.failed), (0, 0, 0));
    let after_second: Vec<_> = std::fs::read_dir(dir.path())?.collect();
    assert_eq!(after_first.len(), after_second.len());
    Ok(())
}

#[tokio::test]
async fn sweep_age_boundary() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = TempStore::new(dir.path());
    let path = store.write(b"%PDF").await?;
    let mtime = modified(&path);
    let hour = Duration::from_secs(60 * 60);
    let epsilon = Duration::from_millis(5);

    assert_eq!(store.sweep_expired_at(mtime + hour - epsilon).deleted, 0);
    assert_eq!(store.sweep_expired_at(mtime + hour).deleted, 0);
    assert!(path.exists());

    assert_eq!(store.sweep_expired_at(mtime + hour + epsilon).deleted, 1);
    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn sweep_continues_past_failures() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = TempStore::new(dir.path());
    let a = store.write(b"%PDF-a").await?;
    let b = store.write(b"%PDF-b").await?;

    // A directory cannot be removed with remove_file, whoever runs the test.
    let stuck = dir.path().join("quotation-0.pdf");
    std::fs::create_dir(&stuck)?;
    std::fs::write(stuck.join("keep"), b"x")?;
    let unrelated = dir.path().join("notes.txt");
    std::fs::write(&unrelated, b"keep me")?;

    let report = store.sweep_expired_at(modified(&b) + Duration::from_secs(2 * 60 * 60));
    assert_eq!(report.scanned, 3);
    assert_eq!(report.deleted, 2);
    assert_eq!(report.failed, 1);
    assert!(!a.exists() && !b.exists());
    assert!(stuck.exists());
    assert!(unrelated.exists());
    Ok(())
}

#[test]
fn long_quotations_paginate_with_bands() -> TestResult {
    let dir = tempfile::tempdir()?;
    let items = (1..=45)
        .map(|i| LineItem::new(format!("Room {i}"), "Dust and vacuum", Money::from_dollars(12)))
        .collect();
    let renderer = renderer_in(dir.path()).with_catalog(items);
    let pdf = GeneratedPdf::from_bytes(renderer.render_to_bytes(&fixed_quotation(&renderer, &jane()))?)?;

    assert!(pdf.page_count() >= 3);
    for page in 1..=pdf.page_count() as u32 {
        let text = pdf.page_text(page);
        assert!(text.contains("Thank you for choosing Molly Maid!"), "footer on page {page}");
        assert_eq!(text.contains("Professional Cleaning Services"), page == 1, "header on page {page}");
    }
    assert!(pdf.text().contains("$540.00"));
    Ok(())
}

#[tokio::test]
async fn very_long_address_continues_across_pages() -> TestResult {
    let dir = tempfile::tempdir()?;
    let address = "Apartment 12 Oak Street Springfield ".repeat(400);
    let request = QuotationRequest::new("jane@example.com", address, "90210");
    let path = renderer_in(dir.path()).render(&request).await?;
    let pdf = GeneratedPdf::from_file(&path)?;

    assert!(pdf.page_count() >= 5);
    let text = pdf.text();
    assert_eq!(text.matches("Springfield").count(), 400);
    for needle in ["jane@example.com", "Address:", "90210", "$150.00"] {
        assert!(text.contains(needle), "missing {needle:?}");
    }
    for page in 1..=pdf.page_count() as u32 {
        assert!(pdf.page_text(page).contains("Thank you for choosing Molly Maid!"));
    }
    Ok(())
}

#[tokio::test]
async fn long_email_link_wraps_and_every_piece_links() -> TestResult {
    let dir = tempfile::tempdir()?;
    let email = "firstname.middlename.lastname.extra.words@example-customer-domain.com";
    let request = QuotationRequest::new(email, "12 Oak St", "90210");
    let path = renderer_in(dir.path()).render(&request).await?;
    let pdf = GeneratedPdf::from_file(&path)?;

    let uris = link_uris(&pdf.doc);
    assert!(uris.len() >= 2, "expected the link to wrap, got {uris:?}");
    for uri in &uris {
        let (_, query) = uri.split_once("?email=").unwrap();
        assert_eq!(percent_decode_str(query).decode_utf8()?, email);
    }
    Ok(())
}

#[test]
fn oversize_block_fails_the_render() {
    let dir = tempfile::tempdir().unwrap();
    let mut theme = Theme::default();
    theme.bands.header_height = 720.0;
    let renderer = renderer_in(dir.path()).with_theme(theme);
    let result = renderer.render_to_bytes(&fixed_quotation(&renderer, &jane()));
    assert!(matches!(
        result,
        Err(QuoteError::Layout(LayoutError::ElementTooLarge(_, _)))
    ));
}

#[tokio::test]
async fn empty_fields_still_render() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = renderer_in(dir.path())
        .render(&QuotationRequest::default())
        .await?;
    let pdf = GeneratedPdf::from_file(&path)?;
    assert!(pdf.text().contains("Customer Details"));
    assert!(references_font(&pdf.bytes, "Helvetica-Bold"));
    assert!(references_font(&pdf.bytes, "Helvetica-Oblique"));
    Ok(())
}
