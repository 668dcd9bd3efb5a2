use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::core::blocks::{
    ArenaClient, ArenaError, AttachmentPayload, Block, BlockFields, BlockId, BlockKind,
    EmbedPayload, ImagePayload,
};

pub const DEFAULT_API_URL: &str = "https://api.are.na/v2";

/// Minimal Are.na REST API client. It only exposes the calls the importer needs.
pub struct ArenaApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ArenaApiClient {
    pub fn new(token: Option<String>) -> Result<Self, ArenaError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert(
            "User-Agent",
            HeaderValue::from_static(concat!("arena-importer/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ArenaError::Api(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DEFAULT_API_URL.to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn map_block(api: ApiBlock) -> Block {
        let fields = BlockFields {
            class: api.class.unwrap_or_default(),
            content: api.content,
            image: api.image.and_then(|image| {
                let url = image.original.and_then(|o| o.url)?;
                Some(ImagePayload {
                    content_type: image.content_type.unwrap_or_default(),
                    url,
                })
            }),
            embed: api
                .embed
                .and_then(|embed| embed.html)
                .map(|html| EmbedPayload { html }),
            source_url: api.source.and_then(|source| source.url),
            attachment: api.attachment.and_then(|attachment| {
                Some(AttachmentPayload {
                    url: attachment.url?,
                    extension: attachment.extension.unwrap_or_else(|| "bin".to_string()),
                })
            }),
        };

        Block {
            id: BlockId::new(api.id),
            title: api.title.filter(|t| !t.is_empty()),
            kind: BlockKind::resolve(fields),
        }
    }
}

#[async_trait]
impl ArenaClient for ArenaApiClient {
    async fn fetch_block(&self, id: &BlockId) -> Result<Block, ArenaError> {
        let url = format!("{}/blocks/{}", self.base_url, id);
        let mut req = self.client.get(&url);
        // Only the API sees the token; asset downloads go to other hosts.
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ArenaError::Api(e.to_string()))?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(ArenaError::Unauthorized),
            status if status.is_success() => {
                let block: ApiBlock = resp
                    .json()
                    .await
                    .map_err(|e| ArenaError::Api(e.to_string()))?;
                tracing::debug!(block_id = %id, class = ?block.class, "Fetched Are.na block");
                Ok(Self::map_block(block))
            }
            status => Err(ArenaError::Http {
                status: status.as_u16(),
                url,
            }),
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ArenaError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ArenaError::Api(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ArenaError::Http {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ArenaError::Api(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[derive(Debug, Deserialize)]
struct ApiBlock {
    id: u64,
    title: Option<String>,
    class: Option<String>,
    content: Option<String>,
    image: Option<ApiImage>,
    embed: Option<ApiEmbed>,
    source: Option<ApiSource>,
    attachment: Option<ApiAttachment>,
}

#[derive(Debug, Deserialize)]
struct ApiImage {
    content_type: Option<String>,
    original: Option<ApiImageVersion>,
}

#[derive(Debug, Deserialize)]
struct ApiImageVersion {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiEmbed {
    html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiSource {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiAttachment {
    url: Option<String>,
    extension: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Block {
        ArenaApiClient::map_block(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_map_image_block() {
        let block = parse(
            r#"{
                "id": 101,
                "title": "A picture",
                "class": "Image",
                "content": "",
                "image": {
                    "content_type": "image/png",
                    "filename": "pic.png",
                    "original": { "url": "https://d2w9rnfcy7mm78.cloudfront.net/1/original_pic.png" }
                },
                "embed": null,
                "source": null,
                "attachment": null
            }"#,
        );

        assert_eq!(block.id, BlockId::new(101));
        assert_eq!(block.title.as_deref(), Some("A picture"));
        assert_eq!(
            block.kind,
            BlockKind::Image(ImagePayload {
                content_type: "image/png".to_string(),
                url: "https://d2w9rnfcy7mm78.cloudfront.net/1/original_pic.png".to_string(),
            })
        );
    }

    #[test]
    fn test_map_media_block_with_embed() {
        let block = parse(
            r#"{
                "id": 102,
                "class": "Media",
                "embed": { "html": "<iframe src=\"https://youtube.com\"></iframe>", "type": "video" }
            }"#,
        );

        assert_eq!(
            block.kind,
            BlockKind::Embed(EmbedPayload {
                html: "<iframe src=\"https://youtube.com\"></iframe>".to_string()
            })
        );
    }

    #[test]
    fn test_map_link_block() {
        let block = parse(
            r#"{
                "id": 103,
                "class": "Link",
                "source": { "url": "https://example.com", "title": "Example" },
                "image": {
                    "content_type": "image/jpeg",
                    "original": { "url": "https://images.are.na/preview.jpg" }
                }
            }"#,
        );

        assert_eq!(
            block.kind,
            BlockKind::Link {
                source_url: Some("https://example.com".to_string()),
                image: Some(ImagePayload {
                    content_type: "image/jpeg".to_string(),
                    url: "https://images.are.na/preview.jpg".to_string(),
                }),
            }
        );
    }

    #[test]
    fn test_map_attachment_block() {
        let block = parse(
            r#"{
                "id": 104,
                "class": "Attachment",
                "attachment": {
                    "url": "https://attachments.are.na/doc.pdf",
                    "extension": "pdf",
                    "file_name": "doc.pdf"
                }
            }"#,
        );

        assert_eq!(
            block.kind,
            BlockKind::Attachment(AttachmentPayload {
                url: "https://attachments.are.na/doc.pdf".to_string(),
                extension: "pdf".to_string(),
            })
        );
    }

    #[test]
    fn test_map_text_block_without_content() {
        let block = parse(r#"{ "id": 105, "class": "Text", "title": "" }"#);
        assert_eq!(block.title, None);
        assert_eq!(
            block.kind,
            BlockKind::Text {
                content: String::new()
            }
        );
    }

    #[test]
    fn test_image_without_original_url_is_dropped() {
        let block = parse(
            r#"{ "id": 106, "class": "Image", "image": { "content_type": "image/png" } }"#,
        );
        assert!(matches!(block.kind, BlockKind::Unsupported { .. }));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ArenaApiClient::new(Some("  ".to_string()))
            .unwrap()
            .with_base_url("http://localhost:8080/v2/");
        assert_eq!(client.base_url, "http://localhost:8080/v2");
        assert_eq!(client.token, None);
    }
}
