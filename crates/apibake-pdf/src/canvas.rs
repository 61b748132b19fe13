use apibake_core::LayoutError;

/// RGB color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse `#rgb`, `#rrggbb`, `black` or `white`.
    pub fn from_hex(value: &str) -> Result<Self, LayoutError> {
        let invalid = || LayoutError::InvalidColor(value.to_string());
        match value.trim().to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            _ => {}
        }
        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

/// Rectangle in page coordinates, origin at the top-left corner, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// The standard Type1 faces a PDF viewer always has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl FontFace {
    pub const ALL: [FontFace; 8] = [
        FontFace::Helvetica,
        FontFace::HelveticaBold,
        FontFace::HelveticaOblique,
        FontFace::HelveticaBoldOblique,
        FontFace::Courier,
        FontFace::CourierBold,
        FontFace::CourierOblique,
        FontFace::CourierBoldOblique,
    ];

    pub fn from_name(name: &str) -> Result<Self, LayoutError> {
        Self::ALL
            .into_iter()
            .find(|face| face.base_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| LayoutError::UnsupportedFont(name.to_string()))
    }

    /// PostScript name, as written to `/BaseFont`.
    pub fn base_name(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
            FontFace::HelveticaOblique => "Helvetica-Oblique",
            FontFace::HelveticaBoldOblique => "Helvetica-BoldOblique",
            FontFace::Courier => "Courier",
            FontFace::CourierBold => "Courier-Bold",
            FontFace::CourierOblique => "Courier-Oblique",
            FontFace::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
            FontFace::HelveticaOblique => "F3",
            FontFace::HelveticaBoldOblique => "F4",
            FontFace::Courier => "F5",
            FontFace::CourierBold => "F6",
            FontFace::CourierOblique => "F7",
            FontFace::CourierBoldOblique => "F8",
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(
            self,
            FontFace::HelveticaBold
                | FontFace::HelveticaBoldOblique
                | FontFace::CourierBold
                | FontFace::CourierBoldOblique
        )
    }

    pub fn is_monospace(&self) -> bool {
        matches!(
            self,
            FontFace::Courier
                | FontFace::CourierBold
                | FontFace::CourierOblique
                | FontFace::CourierBoldOblique
        )
    }
}

/// Index of an outline item, as returned by [`Canvas::add_outline_item`].
pub type OutlineId = usize;

/// Drawing surface of the layout writer. Coordinates are top-down, in points.
pub trait Canvas {
    /// Width and height of every page.
    fn page_size(&self) -> (f32, f32);

    /// Append a page and make it current.
    fn add_page(&mut self);

    fn page_count(&self) -> usize;

    /// Make an existing page current, for stamping headers and footers.
    fn switch_to_page(&mut self, index: usize);

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, font: FontFace, size: f32, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Register a named jump target at `y` on the current page.
    fn add_destination(&mut self, name: &str, y: f32);

    /// Make `rect` on the current page jump to a named destination.
    fn add_link(&mut self, rect: Rect, destination: &str);

    /// Add a bookmark pointing at `y` on the current page.
    fn add_outline_item(&mut self, parent: Option<OutlineId>, title: &str, y: f32) -> OutlineId;

    /// Write out the document.
    fn finish(&mut self) -> Result<(), LayoutError>;
}
