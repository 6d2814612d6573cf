use clap::{Args, Subcommand};
use frutos::{
    cart::{CartAction, CartItem, CartState, LineKey, summary::render_summary},
    weights::Weight,
};
use frutos_app::{
    context::AppContext,
    domain::{
        carts::{CartSession, CartsStorageError, FileCartStorage},
        products::ProductUuid,
    },
};

use crate::cli::describe_error;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add packs of a product to the cart
    Add(AddArgs),

    /// Remove a line
    Remove(LineArgs),

    /// Set the quantity of a line
    Set(SetArgs),

    /// Add one pack to a line, up to the stock available
    Inc(LineArgs),

    /// Take one pack off a line
    Dec(LineArgs),

    /// Empty the cart
    Clear,

    /// Show the cart
    Show,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product UUID
    product: ProductUuid,

    /// Pack size in grams (100, 250, 500 or 1000)
    #[arg(long)]
    weight: u32,

    /// Packs to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct LineArgs {
    /// Product identifier of the line
    product: String,

    /// Pack size in grams
    #[arg(long)]
    weight: u32,
}

impl LineArgs {
    fn key(&self) -> LineKey {
        LineKey::new(self.product.clone(), self.weight)
    }
}

#[derive(Debug, Args)]
struct SetArgs {
    #[command(flatten)]
    line: LineArgs,

    /// New quantity; values below one become one
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) async fn run(context: &AppContext, command: CartCommand) -> Result<(), String> {
    let (mut session, dropped) = CartSession::load(context.carts.clone())
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;

    if dropped > 0 {
        println!("removed {dropped} unreadable cart entries");
    }

    let state = match command.command {
        CartSubcommand::Add(args) => {
            let action = add_action(context, &args).await?;

            dispatch(&mut session, action).await?
        }
        CartSubcommand::Remove(args) => {
            dispatch(&mut session, CartAction::Remove(args.key())).await?
        }
        CartSubcommand::Set(args) => {
            let action = CartAction::SetQuantity {
                key: args.line.key(),
                quantity: args.quantity,
            };

            dispatch(&mut session, action).await?
        }
        CartSubcommand::Inc(args) => session.increment(&args.key()).await.map_err(save_error)?,
        CartSubcommand::Dec(args) => session.decrement(&args.key()).await.map_err(save_error)?,
        CartSubcommand::Clear => dispatch(&mut session, CartAction::Clear).await?,
        CartSubcommand::Show => session.state(),
    };

    println!("{}", render_summary(state));

    Ok(())
}

async fn add_action(context: &AppContext, args: &AddArgs) -> Result<CartAction, String> {
    let weight = Weight::try_from(args.weight).map_err(|error| error.to_string())?;

    let record = context
        .products
        .get_product(args.product)
        .await
        .map_err(|error| describe_error("find product", &error))?;

    let product = &record.product;

    if !product.tier(weight).is_some_and(|tier| tier.is_available()) {
        return Err(format!("{} {weight} is out of stock", product.name()));
    }

    let item = CartItem::from_product(args.product.to_string(), product, weight, args.quantity)
        .ok_or_else(|| format!("{} is not sold in {weight}", product.name()))?;

    Ok(CartAction::Add(item))
}

async fn dispatch(
    session: &mut CartSession<FileCartStorage>,
    action: CartAction,
) -> Result<&CartState, String> {
    session.dispatch(action).await.map_err(save_error)
}

fn save_error(error: CartsStorageError) -> String {
    format!("failed to save cart: {error}")
}
