//! Static gemtext pages.

use crate::catalog::Catalog;
use crate::render::Pacing;

pub const GEMINI_MIME: &str = "text/gemini";
pub const ANSI_MIME: &str = "text/x-ansi";
pub const TEXT_MIME: &str = "text/plain";

pub const ROBOTS_TXT: &str = "User-agent: *\nDisallow: /\n";

/// Artworks featured on the front page: (name, caption).
const PICKS: &[(&str, &str)] = &[
    ("us-birth-of-mawu-liza.ans", "the birth of mawu-liza / alpha king & h7 / blocktronics 2019"),
    ("ungenannt-darkness.ans", "darkness / ungenannt / blocktronics 2019"),
    ("us-plague-doctor.ans", "plague doctor / whazzit ober alpha king tainted x avenging angel / blocktronics 2020"),
    ("ungenannt_1453.ans", "1453 / ungenannt / blocktronics 2016"),
    ("LU-TL_DR.ans", "TL;DR / luciano ayres / blocktronics 2015"),
    ("LU-GLITCH.ans", "Glitch (8-bit) / luciano ayres / blocktronics 2015"),
    ("ungenannt_motherofsorrows.ans", "mother of sorrows / ungenannt / blocktronics 2014"),
    ("bym-motherf4.ans", "motherf4 / bym / blocktronics 2014"),
    ("2m-history.ans", "history / mattmatthew / blocktronics 2013"),
];

/// Render the front page.
///
/// Picks missing from the catalog are left out.
pub fn front(hostname: &str, default_pacing: Pacing, catalog: &Catalog) -> String {
    let mut page = format!(
        "\
gemini://{hostname}/

# ANSI art archive

A mirror of the 16colo.rs ANSI art collection. Pieces are sent the way a BBS would have sent them: \
line by line, at the speed of an analog modem. The originals are CP437 and 80 columns wide; they are \
converted to UTF-8 on the fly so they display in a modern terminal.

Use a client that shows responses as they stream in. To skip the modem, put /quick/ in front of the name.

## URL scheme

For every artwork FILENAME in the archive:

* /quick/FILENAME -- the whole file at once
* /FILENAME -- modem emulation with the default settings ({default_pacing})
* /b=<bps>/FILENAME -- constant time per line at <bps>
* /s=<bps>/FILENAME -- per character simulation at <bps>

<bps> must be a positive integer. 8-N-1 framing on a perfect line is assumed.

Per character simulation charges every character and every escape sequence, so blank lines fly by \
and colourful ones crawl. Constant time per line is smoother to watch and is the default.
"
    );

    let picks: Vec<_> = PICKS
        .iter()
        .filter(|(name, _)| catalog.get(name).is_some())
        .collect();
    if !picks.is_empty() {
        page.push_str("\n## Picks\n\n");
        for (name, caption) in picks {
            page.push_str(&format!("=> /quick/{name} {caption}\n"));
        }
    }

    page.push_str(&format!(
        "\n## All {} pieces\n\n=> /list The full list\n=> /source Source code ({})\n",
        catalog.len(),
        env!("CARGO_PKG_LICENSE")
    ));
    page
}

/// Render the source code page.
///
/// An empty `source_url` means the operator has not published one.
pub fn source(source_url: &str) -> String {
    let mut page = format!(
        "# Source code\n\n{} {} is free software under the {} license. \
If you run a modified version, publish your changes and point server.source_url at them.\n\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_LICENSE")
    );
    if source_url.is_empty() {
        page.push_str("No source location is configured for this server. Ask its operator.\n");
    } else {
        page.push_str(&format!("=> {source_url} Source repository\n"));
    }
    page
}

/// Render the list of every artwork name.
pub fn list(catalog: &Catalog) -> String {
    let mut page = format!(
        "# {} works of art\n\n\
Entries are not linked, to keep crawlers away. Request /<name> for modem emulation or \
/quick/<name> for an instant download.\n\n",
        catalog.len()
    );
    for name in catalog.names() {
        page.push_str("* ");
        page.push_str(name);
        page.push('\n');
    }
    page
}
