//! Placement of every panel and text of a comparison image.
//!
//! The layout is computed before any pixel is touched: the qualifying
//! sections give the final canvas height, and each text is a [`TextDraw`]
//! relative to the top of its section.
//!
//! ```text
//!  0 ┌──────────────────────────────────────────────┐
//!    │ A vs (B)                              PC-NA  │ Header
//!    │                                    Mar 2018  │
//! 130├──────────────────────────────────────────────┤
//!    │ Squad FPP - 1720 (1650)   wins  top10s rounds│ FirstPerson
//!    │   kd     win%     top10%     avg damage      │
//!    │   kda    kills    assists    dBNOs           │
//!    │        longest kill     headshots            │
//! 590├──────────────────────────────────────────────┤
//!    │ Squad ...                                    │ ThirdPerson
//!    └──────────────────────────────────────────────┘
//! ```

use image::Rgba;

use crate::{
    compare::ComparisonRequest,
    pubg::{GameModeStats, ModeFamily, Perspective, SeasonStats, season_display_name},
    render::stats_view::{DerivedStatsView, pair},
};

pub const CANVAS_WIDTH: u32 = 1050;
pub const HEADER_HEIGHT: u32 = 130;
pub const BLOCK_HEIGHT: u32 = 460;
pub const NO_DATA_HEIGHT: u32 = 130;

/// Above this width at the large font, the header names switch to the small font.
pub const USERNAME_WIDTH_THRESHOLD: f32 = 755.0;

const USERNAME_X: f32 = 30.0;
const USERNAME_LARGE_Y: f32 = 35.0;
const USERNAME_SMALL_Y: f32 = 40.0;
const HEADER_RIGHT_MARGIN: f32 = 25.0;

const SUBHEADING_Y: f32 = 10.0;
const TOP_Y: f32 = 95.0;
const MIDDLE_Y: f32 = 255.0;
const BOTTOM_Y: f32 = 405.0;
/// Distance from the top of a subheading value to its caption.
const SUBHEADING_CAPTION_GAP: f32 = 45.0;
/// Distance from the top of a band value to its caption, printed below it.
const BAND_CAPTION_GAP: f32 = 35.0;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const ORANGE: Rgba<u8> = Rgba([242, 169, 0, 255]);
const GREY: Rgba<u8> = Rgba([150, 150, 150, 255]);

/// Typeface, size and color of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontKind {
    /// Bold 52px, header names
    UsernameLarge,
    /// Bold 42px, header names too wide for [`FontKind::UsernameLarge`]
    UsernameSmall,
    /// Bold 48px, region and season
    HeaderLabel,
    /// Regular white 36px, block subheading
    Subheading,
    /// Bold orange 30px, stat values
    StatValue,
    /// Regular grey 20px, field names under values
    Caption,
    /// Regular white 32px, no-data message
    Notice,
}

impl FontKind {
    pub fn size(&self) -> f32 {
        match self {
            FontKind::UsernameLarge => 52.0,
            FontKind::UsernameSmall => 42.0,
            FontKind::HeaderLabel => 48.0,
            FontKind::Subheading => 36.0,
            FontKind::StatValue => 30.0,
            FontKind::Caption => 20.0,
            FontKind::Notice => 32.0,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(
            self,
            FontKind::UsernameLarge
                | FontKind::UsernameSmall
                | FontKind::HeaderLabel
                | FontKind::StatValue
        )
    }

    pub fn color(&self) -> Rgba<u8> {
        match self {
            FontKind::StatValue => ORANGE,
            FontKind::Caption => GREY,
            _ => WHITE,
        }
    }
}

/// Which side of the text `x` designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// One text to print. `y` is the top of the text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub text: String,
    pub h_align: HAlign,
    pub font: FontKind,
    pub x: f32,
    pub y: f32,
}

impl TextDraw {
    pub fn new(text: String, h_align: HAlign, font: FontKind, x: f32, y: f32) -> Self {
        TextDraw {
            text,
            h_align,
            font,
            x,
            y,
        }
    }

    /// Left edge of the text once aligned.
    pub fn left(&self, width: f32) -> f32 {
        match self.h_align {
            HAlign::Left => self.x,
            HAlign::Center => self.x - width / 2.0,
            HAlign::Right => self.x - width,
        }
    }
}

/// Measures rendered text.
pub trait TextMeasure {
    /// Width in pixels of `text` printed with `font`.
    fn text_width(&self, font: FontKind, text: &str) -> f32;
}

/// Vertical slice of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    FirstPerson,
    ThirdPerson,
    NoData,
}

impl Section {
    pub fn height(&self) -> u32 {
        match self {
            Section::Header => HEADER_HEIGHT,
            Section::FirstPerson | Section::ThirdPerson => BLOCK_HEIGHT,
            Section::NoData => NO_DATA_HEIGHT,
        }
    }
}

/// A section and every text printed on it.
#[derive(Debug, Clone)]
pub struct PlacedSection {
    pub section: Section,
    /// Distance from the top of the canvas
    pub offset: u32,
    pub draws: Vec<TextDraw>,
}

/// Complete layout of a comparison image.
#[derive(Debug, Clone)]
pub struct ComparisonLayout {
    pub width: u32,
    pub height: u32,
    pub sections: Vec<PlacedSection>,
}

/// Sections to draw, in order.
///
/// A perspective block is kept when either player played a round in it.
/// When neither does, the no-data panel replaces both.
pub fn plan_sections(
    stats_a: &SeasonStats,
    stats_b: &SeasonStats,
    family: ModeFamily,
) -> Vec<Section> {
    let mut sections = vec![Section::Header];

    for (perspective, section) in [
        (Perspective::FirstPerson, Section::FirstPerson),
        (Perspective::ThirdPerson, Section::ThirdPerson),
    ] {
        if stats_a.variant(family, perspective).rounds_played > 0
            || stats_b.variant(family, perspective).rounds_played > 0
        {
            sections.push(section);
        }
    }

    if sections.len() == 1 {
        sections.push(Section::NoData);
    }

    sections
}

/// Lays out the whole comparison image.
pub fn layout_comparison(
    request: &ComparisonRequest,
    stats_a: &SeasonStats,
    stats_b: &SeasonStats,
    family: ModeFamily,
    measure: &impl TextMeasure,
) -> ComparisonLayout {
    let mut offset = 0;
    let mut sections = Vec::new();

    for section in plan_sections(stats_a, stats_b, family) {
        let draws = match section {
            Section::Header => header_draws(request, measure),
            Section::FirstPerson => block_draws(
                stats_a.variant(family, Perspective::FirstPerson),
                stats_b.variant(family, Perspective::FirstPerson),
                &format!("{} FPP", family.label()),
            ),
            Section::ThirdPerson => block_draws(
                stats_a.variant(family, Perspective::ThirdPerson),
                stats_b.variant(family, Perspective::ThirdPerson),
                family.label(),
            ),
            Section::NoData => no_data_draws(family),
        };
        sections.push(PlacedSection {
            section,
            offset,
            draws,
        });
        offset += section.height();
    }

    ComparisonLayout {
        width: CANVAS_WIDTH,
        height: offset,
        sections,
    }
}

fn header_draws(request: &ComparisonRequest, measure: &impl TextMeasure) -> Vec<TextDraw> {
    let names = format!("{} vs ({})", request.player_a, request.player_b);
    let large_width = measure.text_width(FontKind::UsernameLarge, &names);
    let (font, y) = if large_width > USERNAME_WIDTH_THRESHOLD {
        (FontKind::UsernameSmall, USERNAME_SMALL_Y)
    } else {
        (FontKind::UsernameLarge, USERNAME_LARGE_Y)
    };

    let right = CANVAS_WIDTH as f32 - HEADER_RIGHT_MARGIN;

    vec![
        TextDraw::new(names, HAlign::Left, font, USERNAME_X, y),
        TextDraw::new(
            request.region.label(),
            HAlign::Right,
            FontKind::HeaderLabel,
            right,
            10.0,
        ),
        TextDraw::new(
            season_display_name(&request.season),
            HAlign::Right,
            FontKind::HeaderLabel,
            right,
            60.0,
        ),
    ]
}

fn block_draws(
    stats_a: &GameModeStats,
    stats_b: &GameModeStats,
    heading: &str,
) -> Vec<TextDraw> {
    let a = DerivedStatsView::from_stats(stats_a);
    let b = DerivedStatsView::from_stats(stats_b);

    let subheading = |text: String, h_align: HAlign, x: f32| {
        TextDraw::new(text, h_align, FontKind::Subheading, x, SUBHEADING_Y)
    };

    let subheading_caption = |text: &str, x: f32| {
        TextDraw::new(
            text.to_owned(),
            HAlign::Right,
            FontKind::Caption,
            x,
            SUBHEADING_Y + SUBHEADING_CAPTION_GAP,
        )
    };

    let mut draws = vec![
        subheading(
            format!("{} - {}", heading, pair(&a.rating, &b.rating)),
            HAlign::Left,
            60.0,
        ),
        subheading(pair(&a.wins, &b.wins), HAlign::Right, 435.0),
        subheading(pair(&a.top10s, &b.top10s), HAlign::Right, 675.0),
        subheading(pair(&a.rounds_played, &b.rounds_played), HAlign::Right, 870.0),
        subheading_caption("Wins", 435.0),
        subheading_caption("Top 10s", 675.0),
        subheading_caption("Games", 870.0),
    ];

    let stats: [(&str, String, f32, f32); 10] = [
        ("K/D", pair(&a.kd, &b.kd), 160.0, TOP_Y),
        ("Win %", pair(&a.win_percent, &b.win_percent), 376.0, TOP_Y),
        ("Top 10 %", pair(&a.top_ten_percent, &b.top_ten_percent), 605.0, TOP_Y),
        ("Avg Damage", pair(&a.average_damage, &b.average_damage), 841.0, TOP_Y),
        ("KDA", pair(&a.kda, &b.kda), 162.5, MIDDLE_Y),
        ("Kills", pair(&a.kills, &b.kills), 367.5, MIDDLE_Y),
        ("Assists", pair(&a.assists, &b.assists), 605.0, MIDDLE_Y),
        ("DBNOs", pair(&a.dbnos, &b.dbnos), 846.5, MIDDLE_Y),
        ("Longest Kill", pair(&a.longest_kill, &b.longest_kill), 311.0, BOTTOM_Y),
        ("Headshots", pair(&a.headshot_kills, &b.headshot_kills), 726.5, BOTTOM_Y),
    ];

    for (caption, value, x, y) in stats {
        draws.push(TextDraw::new(value, HAlign::Center, FontKind::StatValue, x, y));
        draws.push(TextDraw::new(
            caption.to_owned(),
            HAlign::Center,
            FontKind::Caption,
            x,
            y + BAND_CAPTION_GAP,
        ));
    }

    draws
}

fn no_data_draws(family: ModeFamily) -> Vec<TextDraw> {
    vec![TextDraw::new(
        format!("Players haven't played \"{}\" games this season", family.label()),
        HAlign::Center,
        FontKind::Notice,
        CANVAS_WIDTH as f32 / 2.0,
        50.0,
    )]
}
