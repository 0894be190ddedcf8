//! Static site content rendered into the page sections.

use unicode_width::UnicodeWidthChar;

/// Blank columns on each side of the text
pub const MARGIN: u16 = 2;

/// Wrap width for a document `width` columns wide
pub fn text_width(width: u16) -> u16 {
    width.saturating_sub(2 * MARGIN).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Heading,
    Body,
    Muted,
    Accent,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub kind: LineKind,
    pub text: String,
}

impl ContentLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(LineKind::Blank, "")
    }
}

/// Content of one section, keyed by section id
#[derive(Debug, Clone)]
pub struct SectionContent {
    pub id: String,
    pub title: String,
    pub lines: Vec<ContentLine>,
}

impl SectionContent {
    /// Rows needed at `width` after wrapping, plus one padding row each side
    pub fn rows(&self, width: u16) -> u16 {
        let body: usize = self
            .lines
            .iter()
            .map(|line| wrap(&line.text, width).len())
            .sum();
        (body + 2).min(u16::MAX as usize) as u16
    }
}

struct Project {
    title: &'static str,
    category: &'static str,
    year: &'static str,
    description: &'static str,
    tags: &'static [&'static str],
}

const PROJECTS: &[Project] = &[
    Project {
        title: "Smart Home Hub",
        category: "IoT / Embedded",
        year: "2024",
        description: "Home automation gateway built on ESP32 and Zigbee, with a custom PCB and a 3D-printed enclosure.",
        tags: &["C++", "PCB Design", "MQTT", "React Native"],
    },
    Project {
        title: "Distributed Cloud Platform",
        category: "Backend / K8s",
        year: "2023",
        description: "High-concurrency microservices with real-time stream processing for industrial monitoring.",
        tags: &["Go", "Kubernetes", "gRPC", "TimescaleDB"],
    },
    Project {
        title: "FPGA Image Accelerator",
        category: "Hardware Acceleration / Verilog",
        year: "2022",
        description: "Edge image preprocessing on FPGA that cuts upstream bandwidth substantially.",
        tags: &["Verilog", "Xilinx", "Computer Vision"],
    },
    Project {
        title: "SaaS Dashboard",
        category: "Full Stack",
        year: "2023",
        description: "Minimal data-visualisation platform providing remote management for hardware fleets.",
        tags: &["Next.js", "TypeScript", "D3.js", "PostgreSQL"],
    },
];

struct Role {
    role: &'static str,
    company: &'static str,
    period: &'static str,
    description: &'static str,
}

const EXPERIENCE: &[Role] = &[
    Role {
        role: "Senior Embedded Engineer & Full Stack Developer",
        company: "Future Robotics Ltd.",
        period: "2022 - present",
        description: "Low-level drivers for next-generation robot controllers (C/Rust) and the desktop control software around them.",
    },
    Role {
        role: "Hardware Engineer",
        company: "Silicon Valley IoT",
        period: "2020 - 2022",
        description: "Schematics and multilayer layout for two wearables; cut firmware power draw by 40%.",
    },
    Role {
        role: "Software Engineer",
        company: "Cloud Systems Inc.",
        period: "2018 - 2020",
        description: "Highly available backend APIs and the migration from a monolith to services.",
    },
];

const SKILLS: &[(&str, &str)] = &[
    ("Embedded", "C, Rust, FreeRTOS, ESP-IDF, STM32"),
    ("Hardware", "KiCad, Altium, Verilog, signal integrity"),
    ("Backend", "Go, Rust, PostgreSQL, Kubernetes, gRPC"),
    ("Frontend", "TypeScript, React, D3.js"),
];

const SOCIAL_LINKS: &[&str] = &["GitHub", "StackOverflow", "LinkedIn", "Bilibili"];

/// Content for a section id; unknown ids get a title-only placeholder
pub fn section_content(id: &str, contact_email: &str) -> SectionContent {
    let (title, lines) = match id {
        "hero" => ("Liu . Engineering", hero()),
        "work" => ("Selected Work", work()),
        "about" => ("Tech Stack", about()),
        "experience" => ("Career", experience()),
        "contact" => ("Contact", contact(contact_email)),
        other => (other, Vec::new()),
    };

    let mut all = vec![ContentLine::new(LineKind::Title, title), ContentLine::blank()];
    all.extend(lines);

    SectionContent {
        id: id.to_string(),
        title: title.to_string(),
        lines: all,
    }
}

fn hero() -> Vec<ContentLine> {
    vec![
        ContentLine::new(LineKind::Accent, "Hardware to cloud, one engineer."),
        ContentLine::blank(),
        ContentLine::new(
            LineKind::Body,
            "I design circuit boards, write the firmware that runs on them and build the services that keep them talking.",
        ),
        ContentLine::blank(),
        ContentLine::new(LineKind::Muted, "Scroll or press PageDown to continue"),
    ]
}

fn work() -> Vec<ContentLine> {
    let mut lines = Vec::new();
    for project in PROJECTS {
        lines.push(ContentLine::new(
            LineKind::Heading,
            format!("{}  ({})", project.title, project.year),
        ));
        lines.push(ContentLine::new(LineKind::Muted, project.category));
        lines.push(ContentLine::new(LineKind::Body, project.description));
        lines.push(ContentLine::new(LineKind::Accent, project.tags.join(" · ")));
        lines.push(ContentLine::blank());
    }
    lines
}

fn about() -> Vec<ContentLine> {
    SKILLS
        .iter()
        .flat_map(|(area, stack)| {
            [
                ContentLine::new(LineKind::Heading, *area),
                ContentLine::new(LineKind::Body, *stack),
                ContentLine::blank(),
            ]
        })
        .collect()
}

fn experience() -> Vec<ContentLine> {
    let mut lines = Vec::new();
    for role in EXPERIENCE {
        lines.push(ContentLine::new(LineKind::Heading, role.role));
        lines.push(ContentLine::new(
            LineKind::Muted,
            format!("{} | {}", role.company, role.period),
        ));
        lines.push(ContentLine::new(LineKind::Body, role.description));
        lines.push(ContentLine::blank());
    }
    lines
}

fn contact(email: &str) -> Vec<ContentLine> {
    vec![
        ContentLine::new(LineKind::Body, "Have a board to bring up or a system to scale?"),
        ContentLine::blank(),
        ContentLine::new(LineKind::Accent, email),
        ContentLine::new(LineKind::Muted, "Press m to write an email"),
        ContentLine::blank(),
        ContentLine::new(LineKind::Muted, SOCIAL_LINKS.join("  /  ")),
    ]
}

/// Greedy word wrap by display width. Always returns at least one line.
pub fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width: usize = word.chars().map(|c| c.width().unwrap_or(0)).sum();
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        // hard-break words wider than the line
        for c in word.chars() {
            let w = c.width().unwrap_or(0);
            if current_width + w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += w;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
