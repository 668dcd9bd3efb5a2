use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Single-field prompt asking for a block URL.
pub struct InsertBlockModal {
    pub title: &'static str,
    pub placeholder: &'static str,
}

impl Default for InsertBlockModal {
    fn default() -> Self {
        Self {
            title: "Insert Are.na block",
            placeholder: "https://are.na/block/123",
        }
    }
}

impl InsertBlockModal {
    /// Returns the submitted URL, or `None` when the prompt was left empty.
    ///
    /// A URL passed on the command line is submitted without prompting.
    pub async fn open<R>(
        &self,
        prefilled: Option<String>,
        input: R,
    ) -> std::io::Result<Option<String>>
    where
        R: AsyncBufRead + Unpin,
    {
        if let Some(url) = prefilled {
            return Ok(submitted(url));
        }

        eprintln!("{}", self.title);
        eprint!("URL ({}): ", self.placeholder);

        let mut lines = input.lines();
        let line = lines.next_line().await?;
        Ok(line.and_then(submitted))
    }
}

fn submitted(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
