#![forbid(unsafe_code)]

use vera_ast::{Assignment, Command, Comparison, Program};

use crate::error::VerifyError;

/// Outcome of splitting an environment on a branch condition. Either side
/// may hold several environments (or none): a strategy that enumerates the
/// complement of a refinement produces one environment per piece, and a
/// condition that cannot hold at all produces an empty side.
pub struct Fork<E> {
    pub holds: Vec<E>,
    pub fails: Vec<E>,
}

/// What an abstraction plugs into the path-sensitive walk. The walk itself
/// is domain-agnostic: it only assigns, forks, and finally asks whether the
/// post-condition holds on a terminal environment.
pub trait Strategy {
    type Env: Clone;

    fn initial_env(&mut self, program: &Program) -> Self::Env;

    fn assign(&mut self, env: &mut Self::Env, assign: &Assignment) -> Result<(), VerifyError>;

    fn fork(&mut self, env: &Self::Env, cond: &Comparison) -> Result<Fork<Self::Env>, VerifyError>;

    fn check_post(&mut self, env: Self::Env, post: &Comparison) -> Result<bool, VerifyError>;
}

/// Walks every execution path of the program and reports true only when the
/// post-condition is established on all of them. Path count is exponential
/// in the number of `if` commands; programs here are small.
pub fn verify_program<S: Strategy>(
    strategy: &mut S,
    program: &Program,
) -> Result<bool, VerifyError> {
    let env = strategy.initial_env(program);
    verify_from(strategy, program, &program.commands, env)
}

fn verify_from<S: Strategy>(
    strategy: &mut S,
    program: &Program,
    commands: &[Command],
    mut env: S::Env,
) -> Result<bool, VerifyError> {
    for (idx, command) in commands.iter().enumerate() {
        match command {
            Command::Assign(assign) => strategy.assign(&mut env, assign)?,
            Command::If(if_cmd) => {
                let rest = &commands[idx + 1..];
                let fork = strategy.fork(&env, &if_cmd.condition)?;
                for mut branch in fork.holds {
                    for assign in &if_cmd.body {
                        strategy.assign(&mut branch, assign)?;
                    }
                    if !verify_from(strategy, program, rest, branch)? {
                        return Ok(false);
                    }
                }
                for branch in fork.fails {
                    if !verify_from(strategy, program, rest, branch)? {
                        return Ok(false);
                    }
                }
                return Ok(true);
            }
        }
    }
    strategy.check_post(env, &program.post)
}
