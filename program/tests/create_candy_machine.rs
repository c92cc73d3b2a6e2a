mod common;
use common::*;

#[tokio::test]
async fn create_candy_machine_confirms() {
    let ctx = common::program_test().start_with_context().await;
    let program = common::music3(&ctx);

    let tx = program.methods().create_candy_machine().rpc().await.unwrap();
    assert_ne!(tx, Signature::default());
}

#[tokio::test]
async fn create_candy_machine_logs_greeting() {
    let mut ctx = common::program_test().start_with_context().await;
    let program = common::music3(&ctx);

    let ix = program.methods().create_candy_machine().instruction();
    let logs = common::logs_of(&mut ctx, ix).await;

    assert!(
        logs.iter().any(|l| l == "Program log: Instruction: CreateCandyMachine"),
        "{logs:#?}"
    );
    assert!(logs.iter().any(|l| l == "Program log: Greetings from:"));
    assert!(logs.iter().any(|l| *l == format!("Program log: {}", program_id())));
}
