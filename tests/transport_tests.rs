// HTTP transport against a local stub server, and background dispatch

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use solvetty::editor::EditCommand;
use solvetty::session::{Action, Effect, Session};
use solvetty::solver::response::ExpressionResult;
use solvetty::solver::{
    Dispatcher, HttpTransport, SolveError, SolveReply, SolveRequest, SolveResult, SolveTransport,
    Ticket,
};

/// Serve one canned response and hand back the raw request that was received
fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        request
    });
    (format!("http://{}", address), handle)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut received = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        received.extend_from_slice(&chunk[..n]);
        let Some(header_end) = received.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&received[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if received.len() >= header_end + 4 + content_length {
            break;
        }
    }
    String::from_utf8(received).unwrap()
}

fn transport(base_url: &str) -> HttpTransport {
    HttpTransport::new(base_url, Some(Duration::from_secs(5))).unwrap()
}

#[test]
fn posts_json_to_the_endpoint_path() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"status":"success","type":"simplify","original_latex":"x + x","final_latex":"2 x"}"#,
    );
    let reply = transport(&url)
        .post(&SolveRequest::Algebra {
            expression: "x+x".into(),
        })
        .unwrap();

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /solve/algebra HTTP/1.1"), "{request}");
    assert!(request.ends_with(r#"{"expression":"x+x"}"#), "{request}");
    let SolveReply::Solved(SolveResult::Expression(result)) = reply else {
        panic!("expected an expression result, got {reply:?}");
    };
    assert_eq!(result.final_latex, "2 x");
}

#[test]
fn validation_error_carries_detail() {
    let (url, server) = serve_once(
        "422 Unprocessable Entity",
        r#"{"detail":"Invalid expression"}"#,
    );
    let err = transport(&url)
        .post(&SolveRequest::Equation {
            expression: "x=".into(),
        })
        .unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, SolveError::Status { status: 422, .. }));
    assert_eq!(err.user_message(), "SERVER_ERROR: Invalid expression");
}

#[test]
fn status_without_detail_reports_the_code() {
    let (url, server) = serve_once("500 Internal Server Error", "Internal Server Error");
    let err = transport(&url)
        .post(&SolveRequest::Algebra {
            expression: "x".into(),
        })
        .unwrap_err();
    server.join().unwrap();

    assert_eq!(
        err.user_message(),
        "SERVER_ERROR: Request failed with status code 500"
    );
}

#[test]
fn empty_detail_falls_back_to_the_status_code() {
    let (url, server) = serve_once("422 Unprocessable Entity", r#"{"detail":""}"#);
    let err = transport(&url)
        .post(&SolveRequest::Algebra {
            expression: "x".into(),
        })
        .unwrap_err();
    server.join().unwrap();

    assert_eq!(
        err.user_message(),
        "SERVER_ERROR: Request failed with status code 422"
    );
}

#[test]
fn success_status_with_error_body_is_a_rejection() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"status":"error","message":"Input Error: could not parse angle"}"#,
    );
    let reply = transport(&url)
        .post(&SolveRequest::AnalyzeAngle {
            angle: "abc".into(),
            is_radians: false,
        })
        .unwrap();
    server.join().unwrap();

    assert_eq!(
        reply,
        SolveReply::Rejected("Input Error: could not parse angle".into())
    );
}

#[test]
fn angle_analysis_yields_a_chart_view() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"status":"success","base_deg":120.0,"base_rad":"\\frac{2\\pi}{3}","neg_deg":-240.0,"quadrant":"II","coords_latex":"\\left( - \\frac{1}{2}, \\frac{\\sqrt{3}}{2} \\right)"}"#,
    );
    let reply = transport(&url)
        .post(&SolveRequest::AnalyzeAngle {
            angle: "480".into(),
            is_radians: false,
        })
        .unwrap();
    let request = server.join().unwrap();

    assert!(request.starts_with("POST /solve/trig/analyze"), "{request}");
    let SolveReply::Solved(result) = reply else {
        panic!("expected a result, got {reply:?}");
    };
    let view = result.chart_view().unwrap();
    assert_eq!(view.angle, 120.0);
    assert!(view.coords.is_some());
}

#[test]
fn unreachable_service_is_a_network_error() {
    // Bind then drop to get a port nothing listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let err = transport(&format!("http://127.0.0.1:{port}"))
        .post(&SolveRequest::Algebra {
            expression: "x".into(),
        })
        .unwrap_err();

    assert!(matches!(err, SolveError::Network(_)), "{err:?}");
    assert!(err.user_message().starts_with("SERVER_ERROR: "));
}

/// Echoes the expression back; inputs starting with `slow` take a while
struct EchoTransport;

impl SolveTransport for EchoTransport {
    fn post(&self, request: &SolveRequest) -> Result<SolveReply, SolveError> {
        let SolveRequest::Algebra { expression } = request else {
            return Err(SolveError::Decode("unexpected request".into()));
        };
        if expression.starts_with("slow") {
            thread::sleep(Duration::from_millis(300));
        }
        Ok(SolveReply::Solved(SolveResult::Expression(ExpressionResult {
            original_latex: expression.clone(),
            final_latex: expression.clone(),
            kind: "echo".into(),
            benchmarks: None,
        })))
    }
}

fn submit(session: &mut Session, input: &str) -> Ticket {
    session.apply(Action::Edit(EditCommand::SelectAll));
    session.apply(Action::Edit(EditCommand::Insert(input.into())));
    let Effect::Dispatch(ticket) = session.apply(Action::Submit) else {
        panic!("expected a dispatch");
    };
    ticket
}

#[test]
fn dispatcher_reports_every_completion_with_its_sequence() {
    let dispatcher = Dispatcher::new(Arc::new(EchoTransport));
    dispatcher.submit(Ticket {
        sequence: 7,
        request: SolveRequest::Algebra {
            expression: "x".into(),
        },
    });

    let completion = dispatcher.wait(Duration::from_secs(5)).unwrap();
    assert_eq!(completion.sequence, 7);
    assert!(matches!(completion.reply, Ok(SolveReply::Solved(_))));
    assert!(dispatcher.try_next().is_none());
}

#[test]
fn latest_submission_wins_regardless_of_arrival_order() {
    let dispatcher = Dispatcher::new(Arc::new(EchoTransport));
    let mut session = Session::new();

    dispatcher.submit(submit(&mut session, "slow-1"));
    dispatcher.submit(submit(&mut session, "fast-2"));

    for _ in 0..2 {
        let completion = dispatcher.wait(Duration::from_secs(5)).unwrap();
        session.apply(Action::Complete(completion));
    }

    let Some(SolveResult::Expression(result)) = session.result() else {
        panic!("expected an expression result");
    };
    assert_eq!(result.final_latex, "fast-2");
    assert!(!session.is_loading());
}
