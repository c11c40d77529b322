use codelala::errors::PromptError;
use codelala::providers::ai::AiProvider;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

/// One recorded `generate` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
}

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<Vec<(String, String)>>>,
    default_response: Arc<Mutex<Option<String>>>,
    failures_left: Arc<Mutex<u32>>,
    failure_status: u16,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            default_response: Arc::new(Mutex::new(None)),
            failures_left: Arc::new(Mutex::new(0)),
            failure_status: 503,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A mock that answers every prompt with `response`.
    pub fn answering(response: &str) -> Self {
        let mock = Self::new();
        mock.set_default_response(response);
        mock
    }

    /// Pre-programs a response for prompts containing `key`.
    /// The key should be a unique substring of the user prompt; the first
    /// matching key wins.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.push((key.to_string(), response.to_string()));
    }

    /// The response used when no key matches.
    pub fn set_default_response(&self, response: &str) {
        *self.default_response.lock().unwrap() = Some(response.to_string());
    }

    /// Makes the next `times` calls fail with an HTTP `status` error.
    pub fn fail_next(mut self, times: u32, status: u16) -> Self {
        *self.failures_left.lock().unwrap() = times;
        self.failure_status = status;
        self
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
        });

        {
            let mut failures_left = self.failures_left.lock().unwrap();
            if *failures_left > 0 {
                *failures_left -= 1;
                return Err(PromptError::AiStatus {
                    status: self.failure_status,
                    body: "MockAiProvider: scripted failure".to_string(),
                });
            }
        }

        let responses = self.responses.lock().unwrap();
        if let Some((_, response)) = responses.iter().find(|(key, _)| user_prompt.contains(key)) {
            return Ok(response.clone());
        }

        if let Some(response) = self.default_response.lock().unwrap().clone() {
            return Ok(response);
        }

        Err(PromptError::AiApi(format!(
            "MockAiProvider: No response programmed for user prompt. Got: '{user_prompt}'"
        )))
    }
}

// --- Test-Specific Helpers ---
#[cfg(feature = "pdf")]
pub mod helpers {
    use anyhow::Result;
    use printpdf::{
        BuiltinFont, Layer, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt, TextItem,
    };

    /// Generates a single-page PDF drawing each entry of `lines` on its own
    /// line in built-in Helvetica, so the extracted text matches the input.
    pub fn generate_test_pdf(lines: &[&str]) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new("Test Syllabus");
        let mut page = PdfPage::new(Mm(210.0), Mm(297.0), vec![]);
        let layer_def = Layer::new("Layer 1");
        let layer_id = doc.add_layer(&layer_def);
        let font = BuiltinFont::Helvetica;

        let mut ops = vec![
            Op::BeginLayer {
                layer_id: layer_id.clone(),
            },
            Op::StartTextSection,
            Op::SetFontSizeBuiltinFont {
                size: Pt(11.0),
                font,
            },
            Op::SetLineHeight { lh: Pt(14.0) },
            Op::SetTextCursor {
                pos: Point {
                    x: Mm(10.0).into(),
                    y: Mm(280.0).into(),
                },
            },
        ];

        for line in lines {
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(line.to_string())],
                font,
            });
            ops.push(Op::AddLineBreak);
        }

        ops.push(Op::EndTextSection);
        ops.push(Op::EndLayer { layer_id });

        page.ops = ops;
        doc.pages.push(page);

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            eprintln!("PDF generation warnings: {warnings:?}");
        }

        Ok(bytes)
    }
}
