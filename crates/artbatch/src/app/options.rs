//! Fixed option sets handed to the export host.

use serde::Serialize;

use crate::app::export::ExportFormat;

/// Options for one run, built once and shared by every document in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ExportOptions {
    Png(PngOptions),
    Svg(SvgOptions),
}

impl ExportOptions {
    pub fn for_format(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Png => ExportOptions::Png(PngOptions::default()),
            ExportFormat::Svg => ExportOptions::Svg(SvgOptions::default()),
        }
    }

    pub fn format(&self) -> ExportFormat {
        match self {
            ExportOptions::Png(_) => ExportFormat::Png,
            ExportOptions::Svg(_) => ExportFormat::Svg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    pub const WHITE: RgbColor = RgbColor {
        red: 255,
        green: 255,
        blue: 255,
    };
}

/// 24-bit PNG export settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PngOptions {
    pub anti_aliasing: bool,
    pub art_board_clipping: bool,
    /// Percent.
    pub horizontal_scale: f64,
    /// Percent.
    pub vertical_scale: f64,
    pub matte: bool,
    pub matte_color: RgbColor,
    #[serde(rename = "saveAsHTML")]
    pub save_as_html: bool,
    pub transparency: bool,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            anti_aliasing: true,
            art_board_clipping: true,
            horizontal_scale: 100.0,
            vertical_scale: 100.0,
            matte: true,
            matte_color: RgbColor::WHITE,
            save_as_html: false,
            transparency: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CssPropertyLocation {
    PresentationAttributes,
    StyleAttributes,
    StyleElements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentEncoding {
    #[serde(rename = "ascii")]
    Ascii,
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-16")]
    Utf16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DtdVersion {
    #[serde(rename = "svg1.0")]
    Svg1_0,
    #[serde(rename = "svg1.1")]
    Svg1_1,
    #[serde(rename = "svg-tiny1.2")]
    SvgTiny1_2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSubsetting {
    None,
    GlyphsUsed,
    AllGlyphs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontType {
    Cef,
    Svg,
    Outline,
}

/// SVG export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgOptions {
    pub compressed: bool,
    /// Decimal digits kept in coordinates.
    pub coordinate_precision: u8,
    pub css_properties: CssPropertyLocation,
    pub document_encoding: DocumentEncoding,
    pub dtd: DtdVersion,
    pub embed_raster_images: bool,
    pub font_subsetting: FontSubsetting,
    pub font_type: FontType,
    pub include_file_info: bool,
    pub include_unused_styles: bool,
    pub include_variables_and_datasets: bool,
    pub optimize_for_svg_viewer: bool,
    pub preserve_editability: bool,
    pub save_multiple_artboards: bool,
    pub slices: bool,
    pub auto_kerning: bool,
    pub text_on_path: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            compressed: false,
            coordinate_precision: 2,
            css_properties: CssPropertyLocation::PresentationAttributes,
            document_encoding: DocumentEncoding::Utf8,
            dtd: DtdVersion::Svg1_1,
            embed_raster_images: false,
            font_subsetting: FontSubsetting::None,
            font_type: FontType::Outline,
            include_file_info: false,
            include_unused_styles: false,
            include_variables_and_datasets: false,
            optimize_for_svg_viewer: false,
            preserve_editability: false,
            save_multiple_artboards: false,
            slices: false,
            auto_kerning: false,
            text_on_path: false,
        }
    }
}
