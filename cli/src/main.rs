use {
	anyhow::{anyhow, Result},
	chrono::{DateTime, TimeZone, Utc},
	clap::{Args, Parser, Subcommand},
	lysergic_client::{
		codec::Amount,
		config::TokenizerConfig,
		instruction::{build_action_instruction, ActionAccounts, TokenizerAction},
		transaction::sign_transaction_instructions,
		Expiry, TokenizerAddresses, UserTokenAccounts,
	},
	solana_cli_config,
	solana_client::nonblocking::rpc_client::RpcClient,
	solana_program::pubkey::Pubkey,
	solana_sdk::signature::{read_keypair_file, Signer},
};

#[derive(Parser, Debug)]
struct Cli {
	#[arg(short, long)]
	config: Option<String>,
	#[arg(short, long)]
	rpc: Option<String>,
	#[arg(short, long)]
	payer: Option<String>,
	#[arg(long)]
	program_id: Option<Pubkey>,
	#[command(subcommand)]
	cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Print the tokenizer, mint and vault addresses for a maturity
	Addresses(TokenizerFields),
	Tokenize(InstructionCommonFields),
	RedeemYield(InstructionCommonFields),
	RedeemPt(InstructionCommonFields),
	ClaimYield(InstructionCommonFields),
}

#[derive(Args, Debug)]
struct TokenizerFields {
	deposit_mint_address: Pubkey,
	/// Epoch milliseconds, RFC 3339, or an expiry preset (12m, 18m, 24m)
	#[arg(value_parser = parse_maturity)]
	maturity: DateTime<Utc>,
}

#[derive(Args, Debug)]
struct InstructionCommonFields {
	amount: Amount,
	#[command(flatten)]
	tokenizer: TokenizerFields,
}

fn parse_maturity(value: &str) -> Result<DateTime<Utc>, String> {
	if let Ok(millis) = value.parse::<i64>() {
		return Utc
			.timestamp_millis_opt(millis)
			.single()
			.ok_or_else(|| format!("`{}` is not a valid timestamp", value));
	}

	if let Some(months) = value.strip_suffix('m').and_then(|m| m.parse::<i64>().ok()) {
		let expiry = Expiry::from_months(months)
			.map_err(|err| format!("Unable to parse the given value to `Expiry`: {}", err))?;
		return expiry
			.maturity_date(Utc::now())
			.ok_or_else(|| "Unable to convert expiry to maturity date".to_string());
	}

	DateTime::parse_from_rfc3339(value)
		.map(|date| date.with_timezone(&Utc))
		.map_err(|err| format!("Unable to parse maturity `{}`: {}", value, err))
}

fn print_addresses(addresses: &TokenizerAddresses, maturity: &DateTime<Utc>) {
	println!("Maturity: {} ({})", maturity.to_rfc3339(), maturity.timestamp_millis());
	println!("Tokenizer Address: {}", addresses.tokenizer);
	println!("Vault Address: {}", addresses.deposit_vault);
	println!("Principal Mint Address: {}", addresses.principal_mint);
	println!("Yield Mint Address: {}", addresses.yield_mint);
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Cli::parse();

	let solana_config_file = match args.config {
		Some(ref config) => solana_cli_config::Config::load(config)
			.map_err(|err| anyhow!("Unable to load config `{}`: {}", config, err))?,
		None => match *solana_cli_config::CONFIG_FILE {
			Some(ref config) => solana_cli_config::Config::load(config).unwrap_or_default(),
			None => solana_cli_config::Config::default(),
		},
	};

	let config = TokenizerConfig::new(
		args.program_id.unwrap_or_else(lysergic_client::id),
		args.rpc.unwrap_or(solana_config_file.json_rpc_url),
	);

	let (action, fields) = match args.cmd {
		Commands::Addresses(fields) => {
			let addresses = TokenizerAddresses::derive(
				&config,
				&fields.deposit_mint_address,
				&fields.maturity,
			)
			.map_err(|err| anyhow!("Unable to derive tokenizer addresses: {}", err))?;
			print_addresses(&addresses, &fields.maturity);
			return Ok(());
		}
		Commands::Tokenize(fields) => (TokenizerAction::TokenizeYield, fields),
		Commands::RedeemYield(fields) => (TokenizerAction::RedeemYield, fields),
		Commands::RedeemPt(fields) => (TokenizerAction::RedeemPrincipal, fields),
		Commands::ClaimYield(fields) => (TokenizerAction::ClaimYield, fields),
	};

	let keypair_path = args.payer.unwrap_or(solana_config_file.keypair_path);
	let wallet_keypair = read_keypair_file(&keypair_path)
		.map_err(|err| anyhow!("Unable to read keypair file: {}", err))?;
	let wallet_pubkey = wallet_keypair.pubkey();

	let deposit_mint = fields.tokenizer.deposit_mint_address;
	let maturity = fields.tokenizer.maturity;

	let addresses = TokenizerAddresses::derive(&config, &deposit_mint, &maturity)
		.map_err(|err| anyhow!("Unable to derive tokenizer addresses: {}", err))?;
	print_addresses(&addresses, &maturity);

	let user = UserTokenAccounts::derive(&wallet_pubkey, &addresses);
	let accounts = ActionAccounts::for_user(action, &addresses, &user);

	let instruction =
		build_action_instruction(&config, &deposit_mint, &maturity, &accounts, &fields.amount)
			.map_err(|err| anyhow!("Unable to create `{:?}` instruction: {}", action, err))?;

	let client = RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment);

	let transaction = sign_transaction_instructions(
		&client,
		&[&wallet_keypair],
		&wallet_pubkey,
		&[instruction],
	)
	.await
	.map_err(|err| anyhow!("Unable to sign transaction: {}", err))?;

	let signature = client
		.send_and_confirm_transaction(&transaction)
		.await
		.map_err(|err| anyhow!("Unable to send transaction: {}", err))?;

	println!("Signature: {}", signature);

	Ok(())
}
