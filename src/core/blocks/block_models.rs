use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Identifier of an Are.na block: the decimal digits as they appear in the
/// block's URL. Length is not limited.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl ToString) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("`{0}` is not a block id")]
pub struct InvalidBlockId(String);

impl FromStr for BlockId {
    type Err = InvalidBlockId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidBlockId(s.to_string()));
        }
        Ok(Self(digits.to_string()))
    }
}

/// Image attached to an Image or Link block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub content_type: String,
    /// URL of the original (full size) image.
    pub url: String,
}

impl ImagePayload {
    /// File extension for the downloaded image, taken from the content type subtype.
    pub fn extension(&self) -> String {
        extension_from_content_type(&self.content_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedPayload {
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPayload {
    pub url: String,
    pub extension: String,
}

/// Raw class-specific fields of a block as the API reports them.
///
/// The infra client fills this in; [`BlockKind::resolve`] turns it into the
/// variant the importer acts on.
#[derive(Debug, Clone, Default)]
pub struct BlockFields {
    pub class: String,
    pub content: Option<String>,
    pub image: Option<ImagePayload>,
    pub embed: Option<EmbedPayload>,
    pub source_url: Option<String>,
    pub attachment: Option<AttachmentPayload>,
}

/// What kind of local file a block turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Image(ImagePayload),
    Embed(EmbedPayload),
    Text {
        content: String,
    },
    Link {
        source_url: Option<String>,
        image: Option<ImagePayload>,
    },
    Attachment(AttachmentPayload),
    Unsupported {
        class: String,
    },
}

impl BlockKind {
    /// Pick the variant for a block. The checks run in a fixed order and the
    /// first match wins, so an Image block without an image but with an embed
    /// still becomes an embed, and any class carrying an embed is one.
    pub fn resolve(fields: BlockFields) -> Self {
        let BlockFields {
            class,
            content,
            image,
            embed,
            source_url,
            attachment,
        } = fields;

        if class == "Image" {
            if let Some(image) = image {
                return BlockKind::Image(image);
            }
            if let Some(embed) = embed {
                return BlockKind::Embed(embed);
            }
            return BlockKind::Unsupported { class };
        }

        if let Some(embed) = embed {
            return BlockKind::Embed(embed);
        }

        match class.as_str() {
            "Text" => BlockKind::Text {
                content: content.unwrap_or_default(),
            },
            "Link" => BlockKind::Link { source_url, image },
            "Attachment" => match attachment {
                Some(attachment) => BlockKind::Attachment(attachment),
                None => BlockKind::Unsupported { class },
            },
            _ => BlockKind::Unsupported { class },
        }
    }
}

/// A block fetched from Are.na. Never cached; every import fetches it again.
#[derive(Debug, Clone)]
pub struct Block {
    pub id: BlockId,
    pub title: Option<String>,
    pub kind: BlockKind,
}

/// `image/png` -> `png`. Parameters such as `; charset=binary` are dropped and
/// a content type without a subtype falls back to `bin`.
pub fn extension_from_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .and_then(|mime| mime.split('/').nth(1))
        .map(str::trim)
        .filter(|subtype| !subtype.is_empty())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "bin".to_string())
}
