#[cfg(test)]
mod tests {
    use std::sync::atomic::{ AtomicBool, AtomicUsize, Ordering };

    use async_trait::async_trait;
    use log::info;

    use crate::errors::ErrorCode;
    use crate::models::image::ImagePayload;
    use crate::solver::pipeline::MathSolver;
    use crate::traits::completion_client::{ ClientError, CompletionClient };
    use crate::traits::connectivity::ConnectivityCheck;

    type Reply = Box<dyn Fn() -> Result<Option<String>, ClientError> + Send + Sync>;

    /// Canned completion client that counts calls and records the last equation
    struct MockClient {
        vision: Reply,
        solution: Reply,
        vision_calls: AtomicUsize,
        solution_calls: AtomicUsize,
        last_equation: std::sync::Mutex<Option<String>>,
    }

    impl MockClient {
        fn new(vision: Reply, solution: Reply) -> Self {
            Self {
                vision,
                solution,
                vision_calls: AtomicUsize::new(0),
                solution_calls: AtomicUsize::new(0),
                last_equation: std::sync::Mutex::new(None),
            }
        }

        fn replying(vision: &str, solution: &str) -> Self {
            let vision = vision.to_string();
            let solution = solution.to_string();
            Self::new(
                Box::new(move || Ok(Some(vision.clone()))),
                Box::new(move || Ok(Some(solution.clone())))
            )
        }

        fn remote_calls(&self) -> usize {
            self.vision_calls.load(Ordering::SeqCst) + self.solution_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionClient for MockClient {
        async fn extract_equation(
            &self,
            _image: &ImagePayload
        ) -> Result<Option<String>, ClientError> {
            self.vision_calls.fetch_add(1, Ordering::SeqCst);
            (self.vision)()
        }

        async fn request_solution(&self, equation: &str) -> Result<Option<String>, ClientError> {
            self.solution_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_equation.lock().unwrap() = Some(equation.to_string());
            (self.solution)()
        }
    }

    struct MockConnectivity {
        online: AtomicBool,
    }

    impl MockConnectivity {
        fn online(online: bool) -> Self {
            Self { online: AtomicBool::new(online) }
        }
    }

    #[async_trait]
    impl ConnectivityCheck for MockConnectivity {
        async fn is_connected(&self) -> bool {
            self.online.load(Ordering::SeqCst)
        }
    }

    fn setup() {
        if env_logger::builder().is_test(true).try_init().is_ok() {
            info!("Logger initialized");
        }
    }

    fn image() -> ImagePayload {
        ImagePayload::from_base64("aW1hZ2U=")
    }

    const CLEAN_REPLY: &str =
        "STEP 1: Add 3 to both sides $x = 5$\nFINAL ANSWER: x equals five $x=5$";

    #[tokio::test]
    async fn solves_image_end_to_end() {
        setup();
        let solver = MathSolver::new(
            MockClient::replying("$$x - 3 = 2$$", CLEAN_REPLY),
            MockConnectivity::online(true)
        );

        let solution = solver.solve_image(&image()).await.unwrap();

        assert_eq!(solution.original_equation, "$x - 3 = 2$");
        assert_eq!(solution.steps, vec!["Add 3 to both sides $x = 5$"]);
        assert_eq!(solution.final_answer, "x equals five $x=5$");
        assert_eq!(
            solver.client().last_equation.lock().unwrap().as_deref(),
            Some("$x - 3 = 2$")
        );
    }

    #[tokio::test]
    async fn offline_fails_before_any_remote_call() {
        setup();
        let solver = MathSolver::new(
            MockClient::replying("$x=1$", CLEAN_REPLY),
            MockConnectivity::online(false)
        );

        let err = solver.solve_image(&image()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoInternet);

        let err = solver.solve_text("x + 1 = 2").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoInternet);

        let err = solver.extract_equation(&image()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoInternet);

        assert_eq!(solver.client().remote_calls(), 0);
    }

    #[tokio::test]
    async fn no_equation_phrase_is_extraction_failure() {
        setup();
        let solver = MathSolver::new(
            MockClient::replying("I cannot see a clear equation", CLEAN_REPLY),
            MockConnectivity::online(true)
        );

        let err = solver.solve_image(&image()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ExtractionFailed);
        assert_eq!(solver.client().solution_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_vision_reply_is_extraction_failure() {
        setup();
        for reply in [None, Some("   "), Some("$$")] {
            let reply = reply.map(str::to_string);
            let solver = MathSolver::new(
                MockClient::new(
                    Box::new(move || Ok(reply.clone())),
                    Box::new(|| Ok(Some(CLEAN_REPLY.to_string())))
                ),
                MockConnectivity::online(true)
            );
            let err = solver.solve_image(&image()).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ExtractionFailed);
        }
    }

    #[tokio::test]
    async fn empty_image_never_reaches_the_client() {
        setup();
        let solver = MathSolver::new(
            MockClient::replying("$x=1$", CLEAN_REPLY),
            MockConnectivity::online(true)
        );
        let err = solver.solve_image(&ImagePayload::from_base64("")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ExtractionFailed);
        assert_eq!(solver.client().remote_calls(), 0);
    }

    #[tokio::test]
    async fn empty_solution_reply_is_solution_failure() {
        setup();
        let solver = MathSolver::new(
            MockClient::new(
                Box::new(|| Ok(Some("$x=1$".to_string()))),
                Box::new(|| Ok(None))
            ),
            MockConnectivity::online(true)
        );
        let err = solver.solve_image(&image()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SolutionFailed);
    }

    #[tokio::test]
    async fn unparseable_solution_is_invalid_solution() {
        setup();
        let solver = MathSolver::new(
            MockClient::replying("$x=1$", "Example: only an illustration"),
            MockConnectivity::online(true)
        );
        let err = solver.solve_text("x = 1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSolution);
    }

    #[tokio::test]
    async fn client_failures_are_classified() {
        setup();
        fn failing(make: fn() -> ClientError) -> Reply {
            Box::new(move || Err(make()))
        }

        let cases = vec![
            (
                failing(|| ClientError::HttpError { status: 401, message: "bad key".into() }),
                ErrorCode::InvalidApiKey,
            ),
            (
                failing(|| ClientError::HttpError { status: 429, message: "slow".into() }),
                ErrorCode::RateLimit,
            ),
            (
                failing(|| ClientError::NetworkError("connection reset".into())),
                ErrorCode::NetworkError,
            ),
            (failing(|| ClientError::ParseError("eof".into())), ErrorCode::UnknownError)
        ];

        for (vision, expected) in cases {
            let solver = MathSolver::new(
                MockClient::new(vision, Box::new(|| Ok(Some(CLEAN_REPLY.to_string())))),
                MockConnectivity::online(true)
            );
            let err = solver.solve_image(&image()).await.unwrap_err();
            assert_eq!(err.code, expected);
            assert_eq!(solver.client().solution_calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn text_path_skips_vision() {
        setup();
        let solver = MathSolver::new(
            MockClient::replying("unused", "STEP 1: Simplify $2x=4$\nSTEP 2: Divide $x=2$"),
            MockConnectivity::online(true)
        );

        let solution = solver.solve_text("  $$2x = 4$$ ").await.unwrap();

        assert_eq!(solution.original_equation, "$2x = 4$");
        assert_eq!(solution.steps, vec!["Simplify $2x=4$"]);
        assert_eq!(solution.final_answer, "Divide $x=2$");
        assert_eq!(solver.client().vision_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_text_is_rejected_without_remote_call() {
        setup();
        let solver = MathSolver::new(
            MockClient::replying("unused", CLEAN_REPLY),
            MockConnectivity::online(true)
        );
        let err = solver.solve_text("  $ $ ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ExtractionFailed);
        assert_eq!(solver.client().remote_calls(), 0);
    }

    #[tokio::test]
    async fn extraction_only_returns_normalized_equation() {
        setup();
        let solver = MathSolver::new(
            MockClient::replying(" $$y = x^2$$ ", CLEAN_REPLY),
            MockConnectivity::online(true)
        );

        let equation = solver.extract_equation(&image()).await.unwrap();

        assert_eq!(equation, "$y = x^2$");
        assert_eq!(solver.client().solution_calls.load(Ordering::SeqCst), 0);
    }
}
