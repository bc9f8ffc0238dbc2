use aasa_verify::{CheckRequest, DomainChecker};

use super::{config_from, report};
use crate::cli::args::CheckArgs;

pub async fn run(args: CheckArgs) -> anyhow::Result<i32> {
    let config = config_from(&args.verify).with_timeout_secs(args.timeout);

    let checker = match DomainChecker::new(config) {
        Ok(checker) => checker,
        Err(e) => return report(Err(e), args.verify.pretty),
    };

    let request = CheckRequest {
        domain: args.domain,
        bundle_identifier: args.ids.bundle_id,
        team_identifier: args.ids.team_id,
        allow_unencrypted: args.allow_unencrypted,
    };

    tracing::debug!(domain = %request.domain, "checking domain");
    let outcome = checker.check(&request).await;
    report(outcome, args.verify.pretty)
}
