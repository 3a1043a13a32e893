use log::{ debug, info, warn };

use crate::errors::{ ClassifiedError, MathSnapResult };
use crate::models::image::ImagePayload;
use crate::models::solution::ParsedSolution;
use crate::solver::classifier::{ classify, is_no_equation_reply, Failure };
use crate::solver::normalizer::{ is_blank_equation, normalize_equation };
use crate::solver::parser::parse_solution;
use crate::traits::completion_client::CompletionClient;
use crate::traits::connectivity::ConnectivityCheck;

/// Runs the extract → normalize → solve → parse pipeline.
///
/// Each public operation classifies its failure exactly once; nothing is
/// retried.
pub struct MathSolver<C, K> {
    client: C,
    connectivity: K,
}

impl<C: CompletionClient, K: ConnectivityCheck> MathSolver<C, K> {
    pub fn new(client: C, connectivity: K) -> Self {
        Self { client, connectivity }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Read the equation in `image` and solve it
    pub async fn solve_image(&self, image: &ImagePayload) -> MathSnapResult<ParsedSolution> {
        info!("Starting image solve");
        let result: Result<_, Failure> = async {
            self.ensure_connected().await?;
            let equation = self.read_equation(image).await?;
            self.solve_normalized(equation).await
        }.await;
        finish("image solve", result)
    }

    /// Solve a typed-in equation
    pub async fn solve_text(&self, equation: &str) -> MathSnapResult<ParsedSolution> {
        info!("Starting text solve");
        let result: Result<_, Failure> = async {
            self.ensure_connected().await?;
            let normalized = normalize_equation(equation);
            if is_blank_equation(&normalized) {
                return Err(ClassifiedError::extraction_failed("No equation was provided.").into());
            }
            self.solve_normalized(normalized).await
        }.await;
        finish("text solve", result)
    }

    /// Read the equation in `image` without solving it
    pub async fn extract_equation(&self, image: &ImagePayload) -> MathSnapResult<String> {
        info!("Starting equation extraction");
        let result: Result<_, Failure> = async {
            self.ensure_connected().await?;
            self.read_equation(image).await
        }.await;
        finish("extraction", result)
    }

    async fn ensure_connected(&self) -> Result<(), Failure> {
        if self.connectivity.is_connected().await {
            Ok(())
        } else {
            Err(ClassifiedError::no_internet().into())
        }
    }

    async fn read_equation(&self, image: &ImagePayload) -> Result<String, Failure> {
        if image.is_empty() {
            return Err(ClassifiedError::extraction_failed("No image data was provided.").into());
        }

        let raw = self.client
            .extract_equation(image).await?
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                ClassifiedError::extraction_failed("Could not extract an equation from the image.")
            })?;
        debug!("Raw equation from vision: {}", raw);

        if is_no_equation_reply(&raw) {
            return Err(
                ClassifiedError::extraction_failed(
                    "No clear equation was found in the image."
                ).into()
            );
        }

        let equation = normalize_equation(&raw);
        if is_blank_equation(&equation) {
            return Err(
                ClassifiedError::extraction_failed(
                    "Could not extract an equation from the image."
                ).into()
            );
        }
        info!("Extracted equation {}", equation);
        Ok(equation)
    }

    async fn solve_normalized(&self, equation: String) -> Result<ParsedSolution, Failure> {
        let reply = self.client
            .request_solution(&equation).await?
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ClassifiedError::solution_failed("No solution was generated."))?;
        debug!("Solution reply is {} characters", reply.len());

        let body = parse_solution(&reply)?;
        info!("Parsed solution with {} steps", body.steps.len());

        Ok(ParsedSolution {
            steps: body.steps,
            final_answer: body.final_answer,
            original_equation: equation,
        })
    }
}

fn finish<T>(stage: &str, result: Result<T, Failure>) -> MathSnapResult<T> {
    result.map_err(|failure| {
        let err = classify(failure);
        warn!("{} failed with {}: {}", stage, err.code, err.message);
        err
    })
}
