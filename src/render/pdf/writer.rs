//! PDF serialization of page plans.

use std::io::Write;

use chrono::{Datelike, Timelike, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_writer::{Content, Date, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::artwork::{Artwork, ArtworkEncoding};
use crate::error::Result;

use super::fonts::{text_width, to_winansi, Face};
use super::layout::{DrawOp, PagePlan};
use super::ExportOptions;

const ARTWORK_NAME: &[u8] = b"Im1";

/// Serialize page plans into a PDF document.
pub(super) fn write_pdf(
    plans: &[PagePlan],
    options: &ExportOptions,
    artwork: Option<&Artwork>,
) -> Result<Vec<u8>> {
    let geometry = &options.geometry;
    let generated = options.generated_at.unwrap_or_else(Utc::now);

    let mut pdf = Pdf::new();
    let mut next_id = 1;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let page_tree_id = alloc();
    let info_id = alloc();
    let regular_id = alloc();
    let bold_id = alloc();

    let artwork_refs = artwork.map(|art| {
        let image_id = alloc();
        let smask_id = matches!(
            art.encoding,
            ArtworkEncoding::Raw { alpha: Some(_), .. }
        )
        .then(&mut alloc);
        (art, image_id, smask_id)
    });

    let page_ids: Vec<Ref> = (0..plans.len()).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..plans.len()).map(|_| alloc()).collect();

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(plans.len() as i32);

    pdf.type1_font(regular_id)
        .base_font(Name(Face::Regular.base_font()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(Face::Bold.base_font()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    pdf.document_info(info_id)
        .title(TextStr(&options.title))
        .producer(TextStr(concat!("critiq ", env!("CARGO_PKG_VERSION"))))
        .creation_date(
            Date::new(generated.year() as u16)
                .month(generated.month() as u8)
                .day(generated.day() as u8)
                .hour(generated.hour() as u8)
                .minute(generated.minute() as u8)
                .second(generated.second() as u8),
        );

    if let Some((art, image_id, smask_id)) = &artwork_refs {
        embed_artwork(&mut pdf, art, *image_id, *smask_id)?;
    }

    for (i, plan) in plans.iter().enumerate() {
        let mut content = Content::new();

        if i == 0 {
            draw_title_block(
                &mut content,
                options,
                &generated.format("Generated %B %-d, %Y at %H:%M UTC").to_string(),
                artwork_refs.as_ref().map(|(art, _, _)| *art),
            );
        } else {
            draw_continuation(&mut content, options);
        }

        for op in &plan.ops {
            draw_op(&mut content, op, options);
        }

        let compressed = deflate(&content.finish())?;
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);
    }

    for i in 0..plans.len() {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, geometry.width, geometry.height))
            .parent(page_tree_id)
            .contents(content_ids[i]);

        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            fonts.pair(Name(Face::Regular.resource_name()), regular_id);
            fonts.pair(Name(Face::Bold.resource_name()), bold_id);
        }
        if let Some((_, image_id, _)) = &artwork_refs {
            resources.x_objects().pair(Name(ARTWORK_NAME), *image_id);
        }
    }

    Ok(pdf.finish())
}

fn draw_op(content: &mut Content, op: &DrawOp, options: &ExportOptions) {
    let geometry = &options.geometry;
    let theme = &options.theme;
    let left = geometry.margin;

    match op {
        DrawOp::SectionHeading {
            lines,
            accent,
            offset,
        } => {
            let line_h = theme.heading_line();
            let total = lines.len() as f32 * line_h;

            let (r, g, b) = accent.to_unit();
            content.save_state();
            content.set_fill_rgb(r, g, b);
            content.rect(left - 9.0, geometry.height - offset - total, 3.5, total);
            content.fill_nonzero();
            content.restore_state();

            content.set_fill_rgb(0.13, 0.12, 0.11);
            for (li, line) in lines.iter().enumerate() {
                let y = baseline(geometry.height, offset + li as f32 * line_h, theme.heading_size);
                for chunk in &line.chunks {
                    show(content, Face::Bold, theme.heading_size, left + chunk.x, y, &chunk.text);
                }
            }
        }

        DrawOp::SubsectionHeading { lines, offset } => {
            let line_h = theme.subheading_line();
            content.set_fill_rgb(0.25, 0.23, 0.21);
            for (li, line) in lines.iter().enumerate() {
                let y = baseline(
                    geometry.height,
                    offset + li as f32 * line_h,
                    theme.subheading_size,
                );
                for chunk in &line.chunks {
                    show(
                        content,
                        Face::Bold,
                        theme.subheading_size,
                        left + chunk.x,
                        y,
                        &chunk.text,
                    );
                }
            }
        }

        DrawOp::Callout {
            lines,
            fill,
            offset,
            height,
        } => {
            let (r, g, b) = fill.to_unit();
            content.save_state();
            content.set_fill_rgb(r, g, b);
            content.rect(
                left,
                geometry.height - offset - height,
                geometry.content_width(),
                *height,
            );
            content.fill_nonzero();
            content.restore_state();

            content.set_fill_rgb(0.15, 0.14, 0.13);
            let line_h = theme.body_line();
            for (li, line) in lines.iter().enumerate() {
                let y = baseline(
                    geometry.height,
                    offset + theme.callout_padding + li as f32 * line_h,
                    theme.body_size,
                );
                draw_chunks(content, line, left + theme.callout_padding, y, theme.body_size);
            }
        }

        DrawOp::TextLine {
            line,
            offset,
            indent,
            bullet,
        } => {
            content.set_fill_rgb(0.2, 0.19, 0.18);
            let y = baseline(geometry.height, *offset, theme.body_size);
            if *bullet {
                show(content, Face::Regular, theme.body_size, left, y, "\u{2022}");
            }
            draw_chunks(content, line, left + indent, y, theme.body_size);
        }

        DrawOp::Footer { text } => {
            let width = text_width(text, Face::Regular, theme.footer_size);
            content.set_fill_rgb(0.45, 0.44, 0.43);
            show(
                content,
                Face::Regular,
                theme.footer_size,
                (geometry.width - width) / 2.0,
                geometry.footer_reserve - 14.0,
                text,
            );
        }
    }
}

fn draw_title_block(
    content: &mut Content,
    options: &ExportOptions,
    generated_line: &str,
    artwork: Option<&Artwork>,
) {
    let geometry = &options.geometry;
    let theme = &options.theme;
    let left = geometry.margin;

    content.set_fill_rgb(0.1, 0.09, 0.08);
    let title_y = baseline(geometry.height, geometry.margin, theme.title_size);
    show(content, Face::Bold, theme.title_size, left, title_y, &options.title);

    content.set_fill_rgb(0.42, 0.4, 0.38);
    let date_y = baseline(
        geometry.height,
        geometry.margin + theme.title_size * 1.5,
        theme.footer_size,
    );
    show(content, Face::Regular, theme.footer_size, left, date_y, generated_line);

    if let Some(art) = artwork {
        let (w, h) = art.fit(180.0, geometry.title_block - 56.0);
        let x = geometry.width - geometry.margin - w;
        let y = geometry.height - geometry.margin - 16.0 - h;
        content.save_state();
        content.transform([w, 0.0, 0.0, h, x, y]);
        content.x_object(Name(ARTWORK_NAME));
        content.restore_state();
    }

    // Rule separating the title block from the content column.
    let rule_y = geometry.height - (geometry.margin + geometry.title_block - 12.0);
    content.save_state();
    content.set_stroke_rgb(0.8, 0.78, 0.76);
    content.set_line_width(0.75);
    content.move_to(left, rule_y);
    content.line_to(geometry.width - geometry.margin, rule_y);
    content.stroke();
    content.restore_state();
}

fn draw_continuation(content: &mut Content, options: &ExportOptions) {
    let geometry = &options.geometry;
    let theme = &options.theme;

    content.set_fill_rgb(0.5, 0.48, 0.46);
    let y = baseline(geometry.height, geometry.margin, theme.footer_size);
    let text = format!("{} (continued)", options.title);
    show(content, Face::Regular, theme.footer_size, geometry.margin, y, &text);
}

fn draw_chunks(
    content: &mut Content,
    line: &super::wrap::WrappedLine,
    left: f32,
    y: f32,
    size: f32,
) {
    for chunk in &line.chunks {
        let face = if chunk.bold { Face::Bold } else { Face::Regular };
        show(content, face, size, left + chunk.x, y, &chunk.text);
    }
}

fn show(content: &mut Content, face: Face, size: f32, x: f32, y: f32, text: &str) {
    let bytes = to_winansi(text);
    content
        .begin_text()
        .set_font(Name(face.resource_name()), size)
        .next_line(x, y)
        .show(Str(&bytes))
        .end_text();
}

/// Text baseline in PDF coordinates for a block top at `offset` from the
/// page top. The 0.78 factor approximates the Helvetica ascender.
fn baseline(page_height: f32, offset: f32, size: f32) -> f32 {
    page_height - offset - size * 0.78
}

fn embed_artwork(
    pdf: &mut Pdf,
    artwork: &Artwork,
    image_id: Ref,
    smask_id: Option<Ref>,
) -> Result<()> {
    match &artwork.encoding {
        ArtworkEncoding::Jpeg(data) => {
            let mut xobj = pdf.image_xobject(image_id, data);
            xobj.filter(Filter::DctDecode);
            xobj.width(artwork.width as i32);
            xobj.height(artwork.height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
        }
        ArtworkEncoding::Raw { rgb, alpha } => {
            if let (Some(alpha), Some(smask_id)) = (alpha, smask_id) {
                let compressed = deflate(alpha)?;
                let mut mask = pdf.image_xobject(smask_id, &compressed);
                mask.filter(Filter::FlateDecode);
                mask.width(artwork.width as i32);
                mask.height(artwork.height as i32);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
            }

            let compressed = deflate(rgb)?;
            let mut xobj = pdf.image_xobject(image_id, &compressed);
            xobj.filter(Filter::FlateDecode);
            xobj.width(artwork.width as i32);
            xobj.height(artwork.height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(smask_id) = smask_id {
                xobj.s_mask(smask_id);
            }
        }
    }
    Ok(())
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
